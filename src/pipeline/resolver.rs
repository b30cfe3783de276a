//! Name lookups against the program-wide registries.
//!
//! A miss is `None`, never an error: degraded documents reference tables
//! without describing them.

use crate::program::{ExternInfo, HeaderType, Registries, TableInfo};

/// Read-only cross-reference view over [`Registries`].
#[derive(Debug, Clone, Copy)]
pub struct CrossReferenceResolver<'a> {
    registries: &'a Registries,
}

impl<'a> CrossReferenceResolver<'a> {
    pub fn new(registries: &'a Registries) -> Self {
        Self { registries }
    }

    pub fn table(&self, name: &str) -> Option<&'a TableInfo> {
        self.registries.tables.get(name)
    }

    /// Resolve a list of table references, dropping misses and keeping order
    pub fn resolve_tables<'n, I>(&self, names: I) -> Vec<(&'n str, &'a TableInfo)>
    where
        I: IntoIterator<Item = &'n String>,
    {
        names
            .into_iter()
            .filter_map(|name| match self.table(name) {
                Some(table) => Some((name.as_str(), table)),
                None => {
                    tracing::trace!("Table reference {} has no registry entry", name);
                    None
                }
            })
            .collect()
    }

    pub fn headers(&self) -> &'a [HeaderType] {
        &self.registries.headers
    }

    pub fn externs(&self) -> &'a [ExternInfo] {
        &self.registries.externs
    }

    pub fn header_count(&self) -> usize {
        self.registries.headers.len()
    }

    pub fn extern_count(&self) -> usize {
        self.registries.externs.len()
    }

    pub fn table_count(&self) -> usize {
        self.registries.tables.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::program::FieldInfo;

    fn registries() -> Registries {
        let mut reg = Registries::default();
        reg.tables.insert(
            "ipv4_lpm".to_string(),
            TableInfo {
                keys: vec!["hdr.ipv4.dstAddr".to_string()],
                actions: vec!["ipv4_forward".to_string(), "drop".to_string()],
                size: Some(1024),
            },
        );
        reg.headers.push(HeaderType {
            name: "ipv4_t".to_string(),
            fields: vec![FieldInfo {
                field: "ttl".to_string(),
                bits: 8,
            }],
        });
        reg.externs.push(ExternInfo {
            ty: "counter".to_string(),
            name: "pkt_counter".to_string(),
        });
        reg
    }

    #[test]
    fn test_lookups() {
        let reg = registries();
        let resolver = CrossReferenceResolver::new(&reg);
        assert_eq!(resolver.table("ipv4_lpm").unwrap().size, Some(1024));
        assert!(resolver.table("missing").is_none());
        assert_eq!(resolver.headers()[0].fields.len(), 1);
        assert_eq!(resolver.externs()[0].ty, "counter");
        assert_eq!(
            (resolver.table_count(), resolver.header_count(), resolver.extern_count()),
            (1, 1, 1)
        );
    }

    #[test]
    fn test_resolve_tables_skips_misses() {
        let reg = registries();
        let resolver = CrossReferenceResolver::new(&reg);
        let names = vec![
            "missing".to_string(),
            "ipv4_lpm".to_string(),
            "also_missing".to_string(),
        ];
        let resolved = resolver.resolve_tables(&names);
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].0, "ipv4_lpm");
    }

    #[test]
    fn test_counts_on_empty_registries() {
        let reg = Registries::default();
        let resolver = CrossReferenceResolver::new(&reg);
        assert_eq!(resolver.table_count(), 0);
        assert_eq!(resolver.header_count(), 0);
        assert_eq!(resolver.extern_count(), 0);
    }
}
