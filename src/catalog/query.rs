use super::params::QueryDescriptor;

/// Rows per page.
pub const PAGE_SIZE: u32 = 10;

/// The fixed 13-column product layout, in storage order. The timestamp is
/// read back as text regardless of the column's declared type.
pub(crate) const PRODUCT_COLUMNS: &str = "id, name, url, imgUrl, title, rating, reviews, sales, \
     price, usedPrice, save, region, CAST(timestamp AS TEXT) AS timestamp";

/// A value bound to a `?` placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum BindArg {
    Text(String),
    Int(i64),
}

/// Parameterized page query: SQL text plus positional arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct PageQuery {
    pub sql: String,
    pub args: Vec<BindArg>,
}

/// Compiles a descriptor into a page query.
///
/// Search terms become `name LIKE ?` conditions joined with `AND`; the
/// `WHERE` keyword is only emitted when at least one condition exists.
pub fn build_page_query(descriptor: &QueryDescriptor) -> PageQuery {
    let mut sql = format!("SELECT {PRODUCT_COLUMNS} FROM products");
    let mut args = Vec::with_capacity(descriptor.search_terms.len() + 1);

    let mut conditions = Vec::with_capacity(descriptor.search_terms.len());
    for term in &descriptor.search_terms {
        conditions.push(r"name LIKE ? ESCAPE '\'");
        args.push(BindArg::Text(like_pattern(term)));
    }

    if !conditions.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&conditions.join(" AND "));
    }

    sql.push_str(" ORDER BY ");
    sql.push_str(descriptor.order.sql());
    sql.push_str(&format!(" LIMIT {PAGE_SIZE} OFFSET ?"));
    args.push(BindArg::Int(i64::from(descriptor.offset)));

    PageQuery { sql, args }
}

/// `%term%` with LIKE metacharacters escaped, so the term matches as a
/// literal substring.
fn like_pattern(term: &str) -> String {
    let mut out = String::with_capacity(term.len() + 2);
    out.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('%');
    out
}
