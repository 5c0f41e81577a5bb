//! Content-type modifier flags parsed from a rule's trailing `$...` tail.
//! Parsed and stored on terminal nodes but not consulted by
//! `Matcher::matches` — see DESIGN.md for why.

/// Tri-state flags for the seven recognized content types. `None` means
/// unset, `Some(true)` means the rule explicitly includes that type,
/// `Some(false)` means it was excluded with a leading `~`.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ModifierSet {
    pub document: Option<bool>,
    pub font: Option<bool>,
    pub image: Option<bool>,
    pub media: Option<bool>,
    pub other: Option<bool>,
    pub script: Option<bool>,
    pub stylesheet: Option<bool>,
}

impl ModifierSet {
    /// Parses a comma-separated modifier tail (the text after a `$`,
    /// with any leading `$` already stripped or not — both are
    /// accepted). Returns `Err(())` if any item contains `=` or names
    /// something other than one of the seven recognized content
    /// types; callers must drop the whole rule in that case ("first,
    /// do no harm").
    pub fn parse(tail: &str) -> Result<Self, ()> {
        let tail = tail.strip_prefix('$').unwrap_or(tail);
        let mut set = ModifierSet::default();
        if tail.is_empty() {
            return Ok(set);
        }
        for item in tail.split(',') {
            let item = item.trim();
            if item.is_empty() {
                continue;
            }
            if item.contains('=') {
                return Err(());
            }
            let (exclude, name) = match item.strip_prefix('~') {
                Some(rest) => (true, rest),
                None => (false, item),
            };
            let flag = match name {
                "document" => &mut set.document,
                "font" => &mut set.font,
                "image" => &mut set.image,
                "media" => &mut set.media,
                "other" => &mut set.other,
                "script" => &mut set.script,
                "stylesheet" => &mut set.stylesheet,
                _ => return Err(()),
            };
            *flag = Some(!exclude);
        }
        Ok(set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_include_and_exclude() {
        let set = ModifierSet::parse("document,~script").unwrap();
        assert_eq!(set.document, Some(true));
        assert_eq!(set.script, Some(false));
        assert_eq!(set.image, None);
    }

    #[test]
    fn rejects_key_value_modifiers() {
        assert_eq!(ModifierSet::parse("domain=x.com"), Err(()));
    }

    #[test]
    fn rejects_unknown_modifier_names() {
        assert_eq!(ModifierSet::parse("third-party"), Err(()));
    }

    #[test]
    fn empty_tail_is_all_unset() {
        assert_eq!(ModifierSet::parse("").unwrap(), ModifierSet::default());
    }

    #[test]
    fn round_trips_through_json() {
        let set = ModifierSet::parse("document,~script").unwrap();
        let json = serde_json::to_string(&set).unwrap();
        let back: ModifierSet = serde_json::from_str(&json).unwrap();
        assert_eq!(set, back);
    }
}
