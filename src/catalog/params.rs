use super::order::SortOrder;

/// Untrusted request parameters, exactly as received.
///
/// `offset` stays textual so a malformed value degrades to the first page
/// instead of rejecting the request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawParams {
    pub search: Option<String>,
    pub order: Option<String>,
    pub offset: Option<String>,
}

impl RawParams {
    pub fn new(search: Option<&str>, order: Option<&str>, offset: Option<&str>) -> Self {
        Self {
            search: search.map(str::to_owned),
            order: order.map(str::to_owned),
            offset: offset.map(str::to_owned),
        }
    }

    /// Picks the parameters out of decoded query-string pairs. A repeated key
    /// keeps its first value; unknown keys are ignored.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut raw = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_ref() {
                "search" => &mut raw.search,
                "order" => &mut raw.order,
                "offset" => &mut raw.offset,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into());
            }
        }
        raw
    }
}

/// Validated page request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryDescriptor {
    /// Non-empty name fragments; every one must match. Empty means no filter.
    pub search_terms: Vec<String>,
    pub offset: u32,
    pub order: SortOrder,
    /// First display id of the page minus one; equals `offset`.
    pub start_index: u32,
}

impl QueryDescriptor {
    /// Normalizes raw parameters. Never fails: anything unusable falls back
    /// to its default.
    pub fn from_raw(raw: &RawParams) -> Self {
        let search_terms = split_terms(raw.search.as_deref().unwrap_or_default());
        let order = SortOrder::from_key(raw.order.as_deref().unwrap_or_default());
        let offset = parse_offset(raw.offset.as_deref());

        Self {
            search_terms,
            offset,
            order,
            start_index: offset,
        }
    }

    pub fn has_filter(&self) -> bool {
        !self.search_terms.is_empty()
    }
}

/// Splits on single spaces. Empty fragments (from an empty string or
/// repeated spaces) would match every name, so they are dropped.
fn split_terms(search: &str) -> Vec<String> {
    search
        .split(' ')
        .filter(|term| !term.is_empty())
        .map(str::to_owned)
        .collect()
}

fn parse_offset(raw: Option<&str>) -> u32 {
    raw.and_then(|s| s.parse::<u32>().ok()).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_everything_missing() {
        let d = QueryDescriptor::from_raw(&RawParams::default());
        assert!(d.search_terms.is_empty());
        assert!(!d.has_filter());
        assert_eq!(d.offset, 0);
        assert_eq!(d.start_index, 0);
        assert_eq!(d.order, SortOrder::IdAsc);
    }

    #[test]
    fn splits_search_on_spaces_preserving_order() {
        let d = QueryDescriptor::from_raw(&RawParams::new(Some("foo bar baz"), None, None));
        assert_eq!(d.search_terms, vec!["foo", "bar", "baz"]);
    }

    #[test]
    fn empty_and_blank_search_apply_no_filter() {
        for search in ["", " ", "   "] {
            let d = QueryDescriptor::from_raw(&RawParams::new(Some(search), None, None));
            assert!(d.search_terms.is_empty(), "{search:?}");
        }
        let d = QueryDescriptor::from_raw(&RawParams::new(Some(" foo  bar "), None, None));
        assert_eq!(d.search_terms, vec!["foo", "bar"]);
    }

    #[test]
    fn malformed_offset_normalizes_to_zero() {
        for offset in ["", "abc", "-10", "1.5", "99999999999", " 10"] {
            let d = QueryDescriptor::from_raw(&RawParams::new(None, None, Some(offset)));
            assert_eq!(d.offset, 0, "{offset:?}");
        }
    }

    #[test]
    fn repeated_keys_keep_first_value() {
        let raw = RawParams::from_pairs([
            ("offset", "20"),
            ("search", "foo"),
            ("template", "rows"),
            ("offset", "30"),
            ("order", "price asc"),
            ("search", "bar"),
            ("order", "rating desc"),
        ]);
        assert_eq!(raw, RawParams::new(Some("foo"), Some("price asc"), Some("20")));
    }

    #[test]
    fn pairs_without_known_keys_give_defaults() {
        let raw = RawParams::from_pairs(Vec::<(String, String)>::new());
        assert_eq!(QueryDescriptor::from_raw(&raw), QueryDescriptor::default());
    }

    #[test]
    fn start_index_tracks_offset() {
        let d = QueryDescriptor::from_raw(&RawParams::new(None, Some("sales desc"), Some("30")));
        assert_eq!(d.offset, 30);
        assert_eq!(d.start_index, 30);
        assert_eq!(d.order, SortOrder::SalesDesc);
    }
}
