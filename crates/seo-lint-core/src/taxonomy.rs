//! Keyword taxonomy: the fixed keyword lists content is scored against.
//!
//! A taxonomy is an ordinary value handed to the analyzer. The built-in
//! one describes the site's own brand; projects replace it wholesale
//! through the `keywords` config key.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, AnalysisResult};

/// Names of the four taxonomy groups, as accepted by [`KeywordTaxonomy::group`].
pub const GROUP_NAMES: &[&str] = &["primary", "long-tail", "competitive", "local"];

const BUILTIN_BRAND: &str = "郭春林";

const BUILTIN_PRIMARY: &[&str] = &[
    "郭春林",
    "郭春林 哲学",
    "郭春林 商业智慧",
    "郭春林 人生哲学",
    "哲学的花园导游",
];

const BUILTIN_LONG_TAIL: &[&str] = &[
    "郭春林 哲学思维",
    "郭春林 批判性思维",
    "郭春林 系统性思维",
    "郭春林 商业哲学",
    "郭春林 企业家思维",
    "郭春林 人生智慧",
    "郭春林 个人成长",
    "郭春林 教育理念",
    "郭春林 YouTube",
    "郭春林 北大",
    "郭春林 哲学老师",
    "郭春林 商业导师",
];

const BUILTIN_COMPETITIVE: &[&str] = &[
    "哲学思维 导师",
    "商业智慧 分享",
    "人生哲学 指导",
    "批判性思维 训练",
    "企业家 思维模式",
    "现代哲学 应用",
    "商业哲学 课程",
    "人生导师 中国",
];

const BUILTIN_LOCAL: &[&str] = &[
    "北京 哲学老师",
    "中国 哲学导师",
    "北大 哲学",
    "北京 商业智慧",
    "中国 人生导师",
];

/// The keyword lists content is scored against.
///
/// Only `primary` and `long_tail` are scored. `competitive` and `local`
/// are reference lists shown alongside results. Duplicates across lists
/// are allowed.
///
/// Omitted groups deserialize as empty, so a configured taxonomy never
/// inherits keywords from the built-in one.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
pub struct KeywordTaxonomy {
    /// The single most important keyword. Falls back to `primary[0]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    /// Brand-identity phrases (highest importance).
    #[serde(default)]
    pub primary: Vec<String>,
    /// Longer, more specific phrases expected to appear occasionally.
    #[serde(default)]
    pub long_tail: Vec<String>,
    /// Competitive-positioning phrases (informational only).
    #[serde(default)]
    pub competitive: Vec<String>,
    /// Geographically scoped phrases (informational only).
    #[serde(default)]
    pub local: Vec<String>,
}

impl Default for KeywordTaxonomy {
    fn default() -> Self {
        Self::builtin()
    }
}

impl KeywordTaxonomy {
    /// The site's built-in brand taxonomy.
    pub fn builtin() -> Self {
        Self {
            brand: Some(BUILTIN_BRAND.to_string()),
            primary: owned(BUILTIN_PRIMARY),
            long_tail: owned(BUILTIN_LONG_TAIL),
            competitive: owned(BUILTIN_COMPETITIVE),
            local: owned(BUILTIN_LOCAL),
        }
    }

    /// An empty taxonomy, for building one up by hand.
    pub const fn empty() -> Self {
        Self {
            brand: None,
            primary: Vec::new(),
            long_tail: Vec::new(),
            competitive: Vec::new(),
            local: Vec::new(),
        }
    }

    /// The brand keyword: `brand` if set, otherwise the first primary keyword.
    pub fn brand_keyword(&self) -> Option<&str> {
        self.brand
            .as_deref()
            .or_else(|| self.primary.first().map(String::as_str))
    }

    /// Look up a group by name (`primary`, `long-tail`, `competitive`, `local`).
    ///
    /// `long_tail` is accepted as a spelling of `long-tail`.
    pub fn group(&self, name: &str) -> AnalysisResult<&[String]> {
        match name {
            "primary" => Ok(self.primary.as_slice()),
            "long-tail" | "long_tail" => Ok(self.long_tail.as_slice()),
            "competitive" => Ok(self.competitive.as_slice()),
            "local" => Ok(self.local.as_slice()),
            _ => Err(AnalysisError::UnknownGroup {
                name: name.to_string(),
                available: GROUP_NAMES.join(", "),
            }),
        }
    }

    /// Check that no keyword is empty or whitespace-only.
    pub fn validate(&self) -> AnalysisResult<()> {
        if let Some(ref brand) = self.brand
            && brand.trim().is_empty()
        {
            return Err(AnalysisError::InvalidTaxonomy {
                group: "brand",
                index: 0,
            });
        }

        let groups: [(&'static str, &[String]); 4] = [
            ("primary", &self.primary),
            ("long-tail", &self.long_tail),
            ("competitive", &self.competitive),
            ("local", &self.local),
        ];
        for (group, keywords) in groups {
            if let Some(index) = keywords.iter().position(|k| k.trim().is_empty()) {
                return Err(AnalysisError::InvalidTaxonomy { group, index });
            }
        }

        Ok(())
    }
}

fn owned(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| (*s).to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_has_all_groups() {
        let t = KeywordTaxonomy::builtin();
        assert_eq!(t.primary.len(), 5);
        assert_eq!(t.long_tail.len(), 12);
        assert_eq!(t.competitive.len(), 8);
        assert_eq!(t.local.len(), 5);
        assert!(t.validate().is_ok());
    }

    #[test]
    fn brand_falls_back_to_first_primary() {
        let t = KeywordTaxonomy {
            primary: vec!["acme".into(), "acme tools".into()],
            ..KeywordTaxonomy::empty()
        };
        assert_eq!(t.brand_keyword(), Some("acme"));
        assert_eq!(KeywordTaxonomy::empty().brand_keyword(), None);
    }

    #[test]
    fn explicit_brand_wins() {
        let t = KeywordTaxonomy {
            brand: Some("Acme".into()),
            primary: vec!["acme tools".into()],
            ..KeywordTaxonomy::empty()
        };
        assert_eq!(t.brand_keyword(), Some("Acme"));
    }

    #[test]
    fn validate_rejects_blank_keyword() {
        let t = KeywordTaxonomy {
            long_tail: vec!["fine".into(), "  ".into()],
            ..KeywordTaxonomy::empty()
        };
        let err = t.validate().unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::InvalidTaxonomy {
                group: "long-tail",
                index: 1
            }
        ));
    }

    #[test]
    fn group_lookup() {
        let t = KeywordTaxonomy::builtin();
        assert_eq!(t.group("local").unwrap().len(), 5);
        assert_eq!(t.group("long_tail").unwrap().len(), 12);
        let err = t.group("regional").unwrap_err();
        assert!(err.to_string().contains("primary, long-tail"));
    }

    #[test]
    fn deserializes_partial_taxonomy() {
        let t: KeywordTaxonomy =
            serde_json::from_str(r#"{"primary": ["acme"], "long_tail": ["acme widgets"]}"#)
                .unwrap();
        assert_eq!(t.primary, vec!["acme"]);
        assert!(t.brand.is_none());
        assert!(t.competitive.is_empty());
        assert!(t.local.is_empty());
    }
}
