use serde::Serialize;

/// Caller-selectable catalog orderings.
///
/// This is the whole whitelist: a request's `order` value is only ever
/// compared against [`SortOrder::key`] and never spliced into SQL. The SQL
/// text comes from [`SortOrder::sql`], which returns literals only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum SortOrder {
    #[default]
    IdAsc,
    RatingDesc,
    ReviewsDesc,
    SalesDesc,
    PriceAsc,
    UsedPriceAsc,
    SaveDesc,
}

impl SortOrder {
    pub const ALL: [SortOrder; 7] = [
        SortOrder::IdAsc,
        SortOrder::RatingDesc,
        SortOrder::ReviewsDesc,
        SortOrder::SalesDesc,
        SortOrder::PriceAsc,
        SortOrder::UsedPriceAsc,
        SortOrder::SaveDesc,
    ];

    /// Exact-match lookup of a request value. Anything else, including case
    /// or whitespace variants, falls back to [`SortOrder::IdAsc`].
    pub fn from_key(raw: &str) -> Self {
        match raw {
            "rating desc" => SortOrder::RatingDesc,
            "reviews desc" => SortOrder::ReviewsDesc,
            "sales desc" => SortOrder::SalesDesc,
            "price asc" => SortOrder::PriceAsc,
            "usedPrice asc" => SortOrder::UsedPriceAsc,
            "save desc" => SortOrder::SaveDesc,
            _ => SortOrder::IdAsc,
        }
    }

    /// Request value that selects this ordering.
    pub fn key(self) -> &'static str {
        match self {
            SortOrder::IdAsc => "id asc",
            SortOrder::RatingDesc => "rating desc",
            SortOrder::ReviewsDesc => "reviews desc",
            SortOrder::SalesDesc => "sales desc",
            SortOrder::PriceAsc => "price asc",
            SortOrder::UsedPriceAsc => "usedPrice asc",
            SortOrder::SaveDesc => "save desc",
        }
    }

    /// ORDER BY body. Non-default orderings break ties on `id` so adjacent
    /// pages never share or skip rows.
    pub fn sql(self) -> &'static str {
        match self {
            SortOrder::IdAsc => "id ASC",
            SortOrder::RatingDesc => "rating DESC, id ASC",
            SortOrder::ReviewsDesc => "reviews DESC, id ASC",
            SortOrder::SalesDesc => "sales DESC, id ASC",
            SortOrder::PriceAsc => "price ASC, id ASC",
            SortOrder::UsedPriceAsc => "usedPrice ASC, id ASC",
            SortOrder::SaveDesc => "save DESC, id ASC",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitelisted_keys_round_trip() {
        for order in SortOrder::ALL {
            assert_eq!(SortOrder::from_key(order.key()), order);
        }
    }

    #[test]
    fn unknown_keys_fall_back_to_id() {
        for raw in [
            "",
            "id asc",
            "RATING DESC",
            "rating  desc",
            " rating desc",
            "rating desc; DROP TABLE products",
            "name asc",
            "price desc",
        ] {
            assert_eq!(SortOrder::from_key(raw), SortOrder::IdAsc, "{raw:?}");
        }
    }

    #[test]
    fn sql_fragments_only_reference_known_columns() {
        let columns = ["id", "rating", "reviews", "sales", "price", "usedPrice", "save"];
        for order in SortOrder::ALL {
            for part in order.sql().split(", ") {
                let (column, direction) = part.split_once(' ').expect("column and direction");
                assert!(columns.contains(&column), "{column}");
                assert!(matches!(direction, "ASC" | "DESC"));
            }
        }
    }
}
