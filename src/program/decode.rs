//! Lenient decoding of the analysis service's JSON output.
//!
//! Every accessor here falls back to an empty or neutral value. Nothing in
//! this file returns an error.

use serde_json::{Map, Value};
use std::collections::BTreeMap;

use super::{
    is_reserved_key, ActionEntry, ActionInfo, ActionParam, ApplyLogic, ExternInfo, FieldInfo,
    HeaderType, ParserStateStep, ProgramStructure, Registries, StageInfo, StageKind, TableInfo,
    EXTERNS_KEY, FILENAME_KEY, HEADERS_KEY, TABLES_KEY,
};

const UNNAMED: &str = "unnamed";

pub(super) fn decode_structure(value: &Value) -> ProgramStructure {
    let Some(root) = value.as_object() else {
        if !value.is_null() {
            tracing::debug!("Structure is not an object, treating as empty");
        }
        return ProgramStructure::default();
    };

    let stages = root
        .iter()
        .filter(|(key, _)| !is_reserved_key(key))
        .map(|(name, info)| decode_stage(name, info))
        .collect();

    let registries = Registries {
        tables: root.get(TABLES_KEY).map(decode_tables).unwrap_or_default(),
        headers: root.get(HEADERS_KEY).map(decode_headers).unwrap_or_default(),
        externs: root.get(EXTERNS_KEY).map(decode_externs).unwrap_or_default(),
    };

    ProgramStructure {
        stages,
        registries,
        filename: root.get(FILENAME_KEY).and_then(Value::as_str).map(str::to_string),
    }
}

fn decode_stage(name: &str, info: &Value) -> StageInfo {
    let Some(obj) = info.as_object() else {
        tracing::debug!("Stage {} is not an object, classifying as unknown", name);
        return StageInfo::new(name, StageKind::unknown());
    };

    let kind = obj
        .get("type")
        .and_then(Value::as_str)
        .map(StageKind::from_label)
        .unwrap_or_else(StageKind::unknown);

    StageInfo {
        name: name.to_string(),
        kind,
        tables: string_list(obj.get("tables")),
        actions: obj
            .get("actions")
            .and_then(Value::as_array)
            .map(|items| items.iter().map(decode_action).collect()),
        states: obj
            .get("states")
            .and_then(Value::as_array)
            .map(|states| decode_parser_steps(states, obj)),
        apply_logic: obj
            .get("apply_logic")
            .and_then(Value::as_object)
            .map(decode_apply_logic),
    }
}

/// Zip `states` with the sparse `extracts` / `transitions` sequences
fn decode_parser_steps(states: &[Value], stage: &Map<String, Value>) -> Vec<ParserStateStep> {
    let extracts = stage.get("extracts").and_then(Value::as_array);
    let transitions = stage.get("transitions").and_then(Value::as_array);
    let aligned = |seq: Option<&Vec<Value>>, i: usize| {
        seq.and_then(|s| s.get(i))
            .and_then(Value::as_str)
            .map(str::to_string)
    };

    states
        .iter()
        .enumerate()
        .map(|(i, state)| ParserStateStep {
            name: text(state),
            extract: aligned(extracts, i),
            transition: aligned(transitions, i),
        })
        .collect()
}

fn decode_action(item: &Value) -> ActionEntry {
    let Some(obj) = item.as_object() else {
        return ActionEntry::Name(text(item));
    };

    let parameters = obj
        .get("parameters")
        .and_then(Value::as_array)
        .map(|params| {
            params
                .iter()
                .map(|p| match p.as_object() {
                    Some(p) => ActionParam {
                        ty: str_field(p, "type").unwrap_or_default(),
                        name: str_field(p, "name").unwrap_or_else(|| UNNAMED.to_string()),
                    },
                    None => ActionParam {
                        ty: String::new(),
                        name: text(p),
                    },
                })
                .collect()
        })
        .unwrap_or_default();

    ActionEntry::Detailed(ActionInfo {
        name: str_field(obj, "name").unwrap_or_else(|| UNNAMED.to_string()),
        parameters,
        body_preview: str_field(obj, "body_preview"),
    })
}

fn decode_apply_logic(obj: &Map<String, Value>) -> ApplyLogic {
    ApplyLogic {
        raw_apply_body: str_field(obj, "raw_apply_body"),
        logic: obj
            .get("logic")
            .and_then(Value::as_array)
            .map(|steps| steps.iter().map(text).collect()),
    }
}

fn decode_tables(value: &Value) -> BTreeMap<String, TableInfo> {
    let Some(obj) = value.as_object() else {
        return BTreeMap::new();
    };
    obj.iter()
        .map(|(name, info)| {
            let table = match info.as_object() {
                Some(t) => TableInfo {
                    keys: string_list(t.get("keys")),
                    actions: string_list(t.get("actions")),
                    size: t.get("size").and_then(Value::as_u64),
                },
                None => TableInfo::default(),
            };
            (name.clone(), table)
        })
        .collect()
}

fn decode_headers(value: &Value) -> Vec<HeaderType> {
    let Some(obj) = value.as_object() else {
        return Vec::new();
    };
    obj.iter()
        .map(|(name, fields)| HeaderType {
            name: name.clone(),
            fields: fields
                .as_array()
                .map(|fields| fields.iter().filter_map(decode_field).collect())
                .unwrap_or_default(),
        })
        .collect()
}

fn decode_field(value: &Value) -> Option<FieldInfo> {
    let obj = value.as_object()?;
    Some(FieldInfo {
        field: str_field(obj, "field").unwrap_or_else(|| UNNAMED.to_string()),
        bits: obj
            .get("bits")
            .and_then(Value::as_u64)
            .and_then(|b| u32::try_from(b).ok())
            .unwrap_or(0),
    })
}

fn decode_externs(value: &Value) -> Vec<ExternInfo> {
    let Some(items) = value.as_array() else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(Value::as_object)
        .map(|e| ExternInfo {
            ty: str_field(e, "type").unwrap_or_default(),
            name: str_field(e, "name").unwrap_or_else(|| UNNAMED.to_string()),
        })
        .collect()
}

fn str_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key).and_then(Value::as_str).map(str::to_string)
}

/// Sequence of display strings; non-sequences are empty
fn string_list(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| items.iter().map(text).collect())
        .unwrap_or_default()
}

/// Strings as-is, everything else as JSON text
fn text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
