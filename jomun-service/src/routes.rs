use crate::error::AppError;
use crate::loader;
use crate::state::SharedState;
use axum::extract::{Query, State};
use axum::Json;
use jomun_core::{
    pick_latest_exact, scan_document, scan_records_frequency, search_records, MatchResult,
    ScanMode, TopicRouter,
};
use serde::{Deserialize, Serialize};

/// Fixed reference notice appended to every answer.
pub const DISCLAIMER: &str = "⚠ 본 응답은 참고용 법령 정보입니다.\n\
    정확한 법률 해석이나 적용은 변호사 등 전문가와 반드시 상담하시기 바랍니다.\n\
    본 정보는 국가법령정보센터 및 고용노동부 고시 등을 기반으로 제공됩니다.";

const DEFAULT_SOURCE: &str = "국가법령정보센터(https://law.go.kr/)";
const ANSWER_MAX_ITEMS: usize = 20;

// GET /healthz
#[derive(Serialize)]
pub struct Health {
    pub status: &'static str,
    pub version: &'static str,
    pub uptime_secs: f64,
    pub records: usize,
    pub documents: usize,
    pub generation: u64,
}

pub async fn healthz(State(state): State<SharedState>) -> Json<Health> {
    let snapshot = state.snapshot().await;
    Json(Health {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        uptime_secs: (state.started_at.elapsed().as_secs_f64() * 10.0).round() / 10.0,
        records: snapshot.records.len(),
        documents: snapshot.documents.len(),
        generation: snapshot.generation,
    })
}

// GET /search
#[derive(Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub keyword: String,
    #[serde(default)]
    pub exact: bool,
    pub page: Option<usize>,
    pub page_size: Option<usize>,
}

#[derive(Serialize)]
pub struct SearchItem {
    pub law_id: String,
    pub law_name: String,
    pub article_no: String,
    pub title: String,
    pub text: String,
    pub effective_date: String,
    pub source_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<u32>,
}

#[derive(Serialize)]
pub struct SearchResponse {
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
    pub items: Vec<SearchItem>,
}

pub async fn search(
    State(state): State<SharedState>,
    Query(params): Query<SearchParams>,
) -> Json<SearchResponse> {
    let snapshot = state.snapshot().await;
    let search_config = &state.config.search;
    let page = params.page.unwrap_or(1).max(1);
    let page_size = params
        .page_size
        .unwrap_or(search_config.default_page_size)
        .clamp(1, search_config.max_page_size);

    let keyword = params.keyword.trim();
    let items: Vec<SearchItem> = if keyword.is_empty() {
        Vec::new()
    } else if params.exact {
        // Literal substring over the accumulated article text, source order.
        snapshot
            .records
            .iter()
            .filter(|r| r.text.contains(keyword))
            .map(|r| item_from(r, None))
            .collect()
    } else {
        search_records(&snapshot.records, keyword, search_config)
            .into_iter()
            .map(|hit| item_from(hit.record, Some(hit.score)))
            .collect()
    };

    let total = items.len();
    let start = page.saturating_sub(1).saturating_mul(page_size);
    let items = items.into_iter().skip(start).take(page_size).collect();
    Json(SearchResponse {
        total,
        page,
        page_size,
        items,
    })
}

fn item_from(record: &jomun_core::FlattenedRecord, score: Option<u32>) -> SearchItem {
    SearchItem {
        law_id: record.law_id.clone(),
        law_name: record.law_name.clone(),
        article_no: record.article_no.clone(),
        title: record.title.clone(),
        text: record.text.clone(),
        effective_date: record.effective_date.clone(),
        source_url: record.source_url.clone(),
        score,
    }
}

// GET /answer
#[derive(Deserialize)]
pub struct AnswerParams {
    #[serde(default)]
    pub q: String,
}

#[derive(Serialize)]
pub struct AnswerResponse {
    pub ok: bool,
    pub content: String,
    pub disclaimer: &'static str,
}

pub async fn answer(
    State(state): State<SharedState>,
    Query(params): Query<AnswerParams>,
) -> Result<Json<AnswerResponse>, AppError> {
    let query = params.q.trim();
    if query.is_empty() {
        return Err(AppError::bad_request("q required"));
    }

    let snapshot = state.snapshot().await;
    let tokens: Vec<&str> = query.split_whitespace().collect();
    let hits: Vec<_> = snapshot
        .records
        .iter()
        .filter(|r| tokens.iter().any(|token| r.text.contains(token)))
        .collect();

    if hits.is_empty() {
        return Ok(Json(AnswerResponse {
            ok: true,
            content: "관련 조문을 찾지 못했습니다.".to_string(),
            disclaimer: DISCLAIMER,
        }));
    }

    let mut content = String::new();
    if let Some(route) = TopicRouter::default_table().route(query) {
        content.push_str(&format!(
            "참고: {} {} 관련 질의로 보입니다.\n\n",
            route.law_name,
            route.article_no.as_deref().unwrap_or("")
        ));
    }
    content.push_str(&format!(
        "총 {}건의 관련 조문이 확인되었습니다.\n\n",
        hits.len()
    ));
    for (i, record) in hits.iter().take(ANSWER_MAX_ITEMS).enumerate() {
        let source = if record.source_url.is_empty() {
            DEFAULT_SOURCE
        } else {
            record.source_url.as_str()
        };
        content.push_str(&format!(
            "{}) {} {} — {}\n{}\n출처: {}\n\n",
            i + 1,
            record.law_name,
            record.article_no,
            record.title,
            record.text,
            source,
        ));
    }

    Ok(Json(AnswerResponse {
        ok: true,
        content: content.trim().to_string(),
        disclaimer: DISCLAIMER,
    }))
}

// GET /scan
#[derive(Deserialize)]
pub struct ScanParams {
    pub law: Option<String>,
    #[serde(default)]
    pub keyword: String,
    #[serde(default)]
    pub mode: ScanMode,
}

#[derive(Serialize)]
pub struct ScanResponse {
    pub total: usize,
    pub items: Vec<MatchResult>,
}

pub async fn scan(
    State(state): State<SharedState>,
    Query(params): Query<ScanParams>,
) -> Result<Json<ScanResponse>, AppError> {
    let snapshot = state.snapshot().await;

    let items = match &params.law {
        Some(law_name) => {
            let document = pick_latest_exact(&snapshot.documents, law_name)
                .ok_or_else(|| AppError::not_found("law"))?;
            scan_document(document, &params.keyword, params.mode)
        }
        None if params.mode == ScanMode::Frequency && !snapshot.records.is_empty() => {
            scan_records_frequency(&snapshot.records)
        }
        None => snapshot
            .documents
            .iter()
            .flat_map(|doc| scan_document(doc, &params.keyword, params.mode))
            .collect(),
    };

    Ok(Json(ScanResponse {
        total: items.len(),
        items,
    }))
}

// POST /reload
#[derive(Serialize)]
pub struct ReloadResponse {
    pub generation: u64,
    pub records: usize,
    pub documents: usize,
}

pub async fn reload(State(state): State<SharedState>) -> Result<Json<ReloadResponse>, AppError> {
    let sources = state.sources.clone();
    let config = state.config.clone();

    // Build the replacement aside; a failure leaves the old snapshot live.
    let built = tokio::task::spawn_blocking(move || loader::load_snapshot(&sources, &config))
        .await
        .map_err(AppError::internal)??;

    let published = state.publish(built).await;
    tracing::info!(
        generation = published.generation,
        records = published.records.len(),
        documents = published.documents.len(),
        "snapshot reloaded"
    );
    Ok(Json(ReloadResponse {
        generation: published.generation,
        records: published.records.len(),
        documents: published.documents.len(),
    }))
}
