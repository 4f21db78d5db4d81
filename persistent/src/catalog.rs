//! Compiled-in environment variable catalog.
//!
//! One entry per recognized key; the entry's position is its catalog
//! index (0..=126). Index 127 is reserved for keys the catalog does not
//! recognize.

/// Log slot id reserved for unrecognized/overflow keys, whose literal
/// name is stored inline instead of an index.
pub const UNKNOWN_INDEX: u8 = 0x7F;

/// Highest usable catalog index.
pub const CATALOG_INDEX_MAX: usize = 126;

/// One recognized environment variable.
#[derive(Debug, Clone, Copy)]
pub struct EnvVar {
    pub key: &'static str,
    pub default_value: &'static str,
    pub description: &'static str,
}

/// Ordered table of recognized variables.
#[derive(Debug, Clone, Copy)]
pub struct Catalog {
    vars: &'static [EnvVar],
}

impl Catalog {
    /// Wrap a descriptor table. At most 127 entries fit the index
    /// encoding.
    pub fn new(vars: &'static [EnvVar]) -> Self {
        debug_assert!(vars.len() <= CATALOG_INDEX_MAX + 1);
        Self { vars }
    }

    pub const fn empty() -> Self {
        Self { vars: &[] }
    }

    /// Case-insensitive key lookup, returning the catalog index.
    pub fn find(&self, key: &str) -> Option<usize> {
        self.vars
            .iter()
            .position(|v| v.key.eq_ignore_ascii_case(key))
    }

    pub fn get(&self, index: usize) -> Option<&EnvVar> {
        self.vars.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &EnvVar> {
        self.vars.iter()
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static VARS: &[EnvVar] = &[
        EnvVar {
            key: "bootaddr",
            default_value: "0x8000",
            description: "kernel load address",
        },
        EnvVar {
            key: "cmdline",
            default_value: "console=ttyAM0",
            description: "kernel command line",
        },
    ];

    #[test]
    fn test_find_case_insensitive() {
        let c = Catalog::new(VARS);
        assert_eq!(c.find("bootaddr"), Some(0));
        assert_eq!(c.find("BootAddr"), Some(0));
        assert_eq!(c.find("CMDLINE"), Some(1));
        assert_eq!(c.find("missing"), None);
    }

    #[test]
    fn test_index_is_table_position() {
        let c = Catalog::new(VARS);
        assert_eq!(c.get(1).unwrap().key, "cmdline");
        assert!(c.get(2).is_none());
    }
}
