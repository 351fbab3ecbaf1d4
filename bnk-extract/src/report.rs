use std::{
    collections::HashMap,
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};

use bnkextr::{
    objects::PassContext,
    structs::{ObjectHeader, ObjectType},
};

pub fn write_objects(path: &Path, objects: &[ObjectHeader], context: &PassContext) -> io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    write_report(&mut out, objects, context)?;
    out.flush()?;
    Ok(())
}

/// One block per object, in HIRC order, decoded details indented below.
///
/// The context keeps only the last record per id, so when ids repeat the details are
/// printed under the last object with that id only.
pub fn write_report<W: Write>(
    w: &mut W,
    objects: &[ObjectHeader],
    context: &PassContext,
) -> io::Result<()> {
    if let Some(header) = context.bank_header {
        writeln!(w, "bank: {}, version: {}", header.id, header.version)?;
    }
    writeln!(w, "objects: {}", objects.len())?;
    let last_seen: HashMap<u32, usize> = objects
        .iter()
        .enumerate()
        .map(|(pos, object)| (object.id, pos))
        .collect();
    for (pos, object) in objects.iter().enumerate() {
        writeln!(
            w,
            "{}: {:?} ({} bytes)",
            object.id, object.object_type, object.size
        )?;
        if last_seen[&object.id] != pos {
            continue;
        }
        match object.object_type {
            ObjectType::Event => {
                if let Some(event) = context.events.get(&object.id) {
                    let ids: Vec<_> = event.action_ids.iter().map(u32::to_string).collect();
                    writeln!(w, "    actions: {}", ids.join(", "))?;
                }
            }
            ObjectType::EventAction => {
                if let Some(action) = context.event_actions.get(&object.id) {
                    writeln!(
                        w,
                        "    {:?} {:?}, game object: {}",
                        action.scope, action.action_type, action.game_object_id
                    )?;
                    for (param_type, value) in action.parameters() {
                        writeln!(w, "    {param_type:?}: {value}")?;
                    }
                }
            }
            _ => {}
        }
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use bnkextr::{
        objects::{EventActionObject, EventObject, PassContext},
        structs::{
            BankHeader, EventActionParameterType, EventActionScope, EventActionType,
            ObjectHeader, ObjectType,
        },
    };

    use crate::report::write_report;

    #[test]
    pub fn report_layout() {
        let mut context = PassContext {
            bank_header: Some(BankHeader {
                version: 134,
                id: 77,
            }),
            ..Default::default()
        };
        context.events.insert(
            1,
            EventObject {
                action_ids: vec![2, 3],
            },
        );
        context.event_actions.insert(
            2,
            EventActionObject {
                scope: EventActionScope::GameObject,
                action_type: EventActionType::Play,
                game_object_id: 9,
                parameter_count: 1,
                parameter_types: vec![EventActionParameterType::Delay],
                parameter_values: vec![-4],
            },
        );
        let objects = [
            ObjectHeader {
                object_type: ObjectType::Event,
                size: 13,
                id: 1,
            },
            ObjectHeader {
                object_type: ObjectType::EventAction,
                size: 17,
                id: 2,
            },
            ObjectHeader {
                object_type: ObjectType::Other(42),
                size: 4,
                id: 3,
            },
        ];
        let mut out = Vec::new();
        write_report(&mut out, &objects, &context).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "bank: 77, version: 134\n\
             objects: 3\n\
             1: Event (13 bytes)\n    actions: 2, 3\n\
             2: EventAction (17 bytes)\n    GameObject Play, game object: 9\n    Delay: -4\n\
             3: Other(42) (4 bytes)\n"
        );
    }

    #[test]
    pub fn repeated_ids_show_details_once() {
        let mut context = PassContext::default();
        context.events.insert(
            5,
            EventObject {
                action_ids: vec![8],
            },
        );
        let event = ObjectHeader {
            object_type: ObjectType::Event,
            size: 9,
            id: 5,
        };
        let mut out = Vec::new();
        write_report(&mut out, &[event, event], &context).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "objects: 2\n\
             5: Event (9 bytes)\n\
             5: Event (9 bytes)\n    actions: 8\n"
        );
    }
}
