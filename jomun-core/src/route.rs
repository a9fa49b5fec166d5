//! Best-effort topic routing from free-text queries to a statute hint
//!
//! A thin heuristic layer over the scan/reconstruct engine: when a query
//! mentions a well-known safety topic, route it to the statute (and
//! usually the article) that governs it. Kept as a data-driven strategy
//! so the table can be swapped or extended without touching the engine.

/// One routing rule: if any keyword occurs in the query, suggest the
/// target statute/article.
#[derive(Debug, Clone)]
pub struct TopicRoute {
    pub keywords: Vec<String>,
    pub law_name: String,
    pub article_no: Option<String>,
}

/// Ordered rule list; the first rule with a keyword hit wins.
#[derive(Debug, Clone)]
pub struct TopicRouter {
    routes: Vec<TopicRoute>,
}

impl TopicRouter {
    pub fn new(routes: Vec<TopicRoute>) -> Self {
        Self { routes }
    }

    /// Built-in table for the occupational-safety corpus this service
    /// is deployed against.
    pub fn default_table() -> Self {
        let route = |keywords: &[&str], law: &str, article: Option<&str>| TopicRoute {
            keywords: keywords.iter().map(|s| s.to_string()).collect(),
            law_name: law.to_string(),
            article_no: article.map(|s| s.to_string()),
        };
        Self::new(vec![
            route(
                &["작업중지", "작업 중지", "급박한 위험"],
                "산업안전보건법",
                Some("제52조"),
            ),
            route(
                &["위험성평가", "위험성 평가"],
                "산업안전보건법",
                Some("제36조"),
            ),
            route(
                &["도급", "원청", "하청"],
                "산업안전보건법",
                Some("제63조"),
            ),
            route(
                &["안전보건교육", "정기교육"],
                "산업안전보건법",
                Some("제29조"),
            ),
            route(
                &["중대재해", "경영책임자"],
                "중대재해처벌법",
                None,
            ),
        ])
    }

    /// First rule whose keyword occurs in the query, if any.
    pub fn route(&self, query: &str) -> Option<&TopicRoute> {
        self.routes
            .iter()
            .find(|rule| rule.keywords.iter().any(|k| query.contains(k.as_str())))
    }
}

impl Default for TopicRouter {
    fn default() -> Self {
        Self::default_table()
    }
}
