//! Test data builders for structure documents

use p4lens::ProgramStructure;
use serde_json::{json, Map, Value};

/// Builder for one stage entry
pub struct StageBuilder {
    name: String,
    fields: Map<String, Value>,
}

impl StageBuilder {
    pub fn new(name: &str, kind: &str) -> Self {
        let mut fields = Map::new();
        fields.insert("type".into(), json!(kind));
        Self {
            name: name.to_string(),
            fields,
        }
    }

    /// A stage with no `type` key at all
    pub fn untyped(name: &str) -> Self {
        Self {
            name: name.to_string(),
            fields: Map::new(),
        }
    }

    pub fn tables(mut self, tables: &[&str]) -> Self {
        self.fields.insert("tables".into(), json!(tables));
        self
    }

    pub fn actions(mut self, actions: &[&str]) -> Self {
        self.fields.insert("actions".into(), json!(actions));
        self
    }

    /// Append a structured action entry with typed parameters
    pub fn detailed_action(mut self, name: &str, params: &[(&str, &str)], body: &str) -> Self {
        let params: Vec<Value> = params
            .iter()
            .map(|(ty, name)| json!({"type": ty, "name": name}))
            .collect();
        let entry = json!({"name": name, "parameters": params, "body_preview": body});
        match self.fields.get_mut("actions").and_then(Value::as_array_mut) {
            Some(actions) => actions.push(entry),
            None => {
                self.fields.insert("actions".into(), json!([entry]));
            }
        }
        self
    }

    /// Parallel `states`/`extracts`/`transitions`; `None` becomes `null`
    pub fn parser_states(mut self, steps: &[(&str, Option<&str>, Option<&str>)]) -> Self {
        let states: Vec<&str> = steps.iter().map(|s| s.0).collect();
        let extracts: Vec<Option<&str>> = steps.iter().map(|s| s.1).collect();
        let transitions: Vec<Option<&str>> = steps.iter().map(|s| s.2).collect();
        self.fields.insert("states".into(), json!(states));
        self.fields.insert("extracts".into(), json!(extracts));
        self.fields.insert("transitions".into(), json!(transitions));
        self
    }

    pub fn apply_body(mut self, body: &str) -> Self {
        self.apply_logic_mut().insert("raw_apply_body".into(), json!(body));
        self
    }

    pub fn logic(mut self, steps: &[&str]) -> Self {
        self.apply_logic_mut().insert("logic".into(), json!(steps));
        self
    }

    fn apply_logic_mut(&mut self) -> &mut Map<String, Value> {
        self.fields
            .entry("apply_logic")
            .or_insert_with(|| json!({}))
            .as_object_mut()
            .expect("apply_logic is always an object here")
    }
}

/// Builder for a complete structure document
#[derive(Default)]
pub struct StructureBuilder {
    root: Map<String, Value>,
    tables: Map<String, Value>,
    headers: Map<String, Value>,
    externs: Vec<Value>,
}

impl StructureBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(mut self, stage: StageBuilder) -> Self {
        self.root.insert(stage.name, Value::Object(stage.fields));
        self
    }

    pub fn table(mut self, name: &str, keys: &[&str], actions: &[&str], size: Option<u64>) -> Self {
        let mut table = json!({"keys": keys, "actions": actions});
        if let Some(size) = size {
            table["size"] = json!(size);
        }
        self.tables.insert(name.to_string(), table);
        self
    }

    pub fn header(mut self, name: &str, fields: &[(&str, u32)]) -> Self {
        let fields: Vec<Value> = fields
            .iter()
            .map(|(field, bits)| json!({"field": field, "bits": bits}))
            .collect();
        self.headers.insert(name.to_string(), json!(fields));
        self
    }

    pub fn extern_instance(mut self, ty: &str, name: &str) -> Self {
        self.externs.push(json!({"type": ty, "name": name}));
        self
    }

    pub fn filename(mut self, filename: &str) -> Self {
        self.root.insert("_filename".into(), json!(filename));
        self
    }

    pub fn to_value(&self) -> Value {
        let mut root = self.root.clone();
        if !self.tables.is_empty() {
            root.insert("_tables".into(), Value::Object(self.tables.clone()));
        }
        if !self.headers.is_empty() {
            root.insert("_headers".into(), Value::Object(self.headers.clone()));
        }
        if !self.externs.is_empty() {
            root.insert("_externs".into(), Value::Array(self.externs.clone()));
        }
        Value::Object(root)
    }

    pub fn build(&self) -> ProgramStructure {
        ProgramStructure::from_value(&self.to_value())
    }
}

/// The basic L3 forwarding program used across tests
pub fn basic_forwarding() -> StructureBuilder {
    StructureBuilder::new()
        .filename("basic.p4")
        .stage(StageBuilder::new("MyDeparser", "deparser"))
        .stage(
            StageBuilder::new("MyIngress", "control")
                .tables(&["ipv4_lpm"])
                .actions(&["drop"])
                .detailed_action(
                    "ipv4_forward",
                    &[("macAddr_t", "dstAddr"), ("egressSpec_t", "port")],
                    "standard_metadata.egress_spec = port;",
                )
                .apply_body("if (hdr.ipv4.isValid()) { ipv4_lpm.apply(); }")
                .logic(&["Check IPv4 validity", "Apply ipv4_lpm"]),
        )
        .stage(StageBuilder::new("MyParser", "parser").parser_states(&[
            ("start", Some("ethernet"), Some("parse_ipv4")),
            ("parse_ipv4", Some("ipv4"), Some("accept")),
        ]))
        .table(
            "ipv4_lpm",
            &["hdr.ipv4.dstAddr"],
            &["ipv4_forward", "drop", "NoAction"],
            Some(1024),
        )
        .header("ethernet_t", &[("dstAddr", 48), ("srcAddr", 48), ("etherType", 16)])
        .header("ipv4_t", &[("version", 4), ("ihl", 4), ("dstAddr", 32)])
        .extern_instance("counter", "pkt_counter")
}
