use serde::Deserialize;
use serde_json::Value;

/// The body of a successful `GET /datasets/{database}/{code}.json` request.
#[derive(Debug, Clone, Deserialize)]
pub struct DatasetResponse {
    pub dataset: Dataset,
}

/// A time-series dataset. Each row in `data` lines up with `column_names`.
#[derive(Debug, Clone, Deserialize)]
pub struct Dataset {
    pub dataset_code: Option<String>,
    pub column_names: Vec<String>,
    pub data: Vec<Vec<Value>>,
    // There are more fields (name, frequency, refreshed_at...), but these are the ones we use.
}

/// The body of a failed request.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    pub quandl_error: ApiErrorDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorDetail {
    pub code: String,
    pub message: String,
}
