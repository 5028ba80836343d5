use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

pub const DEFAULT_TITLE: &str = "No Title";

/// 上游 API 返回的原始 JSON 对象，只读取 `title` 和 `url`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct UpstreamMemeResponse {
    fields: Map<String, Value>,
}

impl UpstreamMemeResponse {
    // 非字符串的值视为缺失
    fn string_field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }

    pub fn into_reply(self) -> MemeReply {
        MemeReply {
            title: self.string_field("title").unwrap_or(DEFAULT_TITLE).to_string(),
            url: self.string_field("url").unwrap_or_default().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct MemeReply {
    #[schema(example = "Funny Cat")]
    pub title: String,
    #[schema(example = "https://i.redd.it/cat.jpg")]
    pub url: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ErrorReply {
    #[schema(example = "Could not connect to the meme API.")]
    pub error: String,
}
