use std::collections::BTreeMap;

/// Province/territory abbreviation to the numeric code Environment Canada uses
/// in its city feed URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvinceCodes {
    codes: BTreeMap<String, u32>,
}

impl ProvinceCodes {
    pub fn new(codes: impl IntoIterator<Item = (String, u32)>) -> Self {
        Self {
            codes: codes.into_iter().collect(),
        }
    }

    pub fn code(&self, abbreviation: &str) -> Option<u32> {
        self.codes.get(abbreviation).copied()
    }

    /// Abbreviations in alphabetical order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.codes.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

impl Default for ProvinceCodes {
    fn default() -> Self {
        Self::new(
            [
                ("ab", 48),
                ("bc", 59),
                ("mb", 46),
                ("nb", 13),
                ("nl", 10),
                ("ns", 12),
                ("nt", 61),
                ("nu", 62),
                ("on", 35),
                ("pe", 11),
                ("qc", 24),
                ("sk", 47),
                ("yt", 60),
            ]
            .into_iter()
            .map(|(abbr, code)| (abbr.to_string(), code)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table() {
        let codes = ProvinceCodes::default();
        assert_eq!(codes.len(), 13);
        assert_eq!(codes.code("on"), Some(35));
        assert_eq!(codes.code("yt"), Some(60));
        assert_eq!(codes.code("zz"), None);
        assert_eq!(codes.iter().next(), Some(("ab", 48)));
    }
}
