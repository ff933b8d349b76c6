use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

use crate::models::{Module, Row, Status, SubTopic, Subject, Topic};

/// `GET subject/{id}` body. Some deployments wrap the tree in `data`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum SubjectResponse {
    Wrapped { data: SubjectDto },
    Bare(SubjectDto),
}

impl SubjectResponse {
    pub fn into_dto(self) -> SubjectDto {
        match self {
            SubjectResponse::Wrapped { data } => data,
            SubjectResponse::Bare(dto) => dto,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct SubjectDto {
    #[serde(default, alias = "_id", deserialize_with = "lenient_id")]
    pub id: String,
    #[serde(default, alias = "subject_name", deserialize_with = "or_default")]
    pub name: String,
    #[serde(default, deserialize_with = "or_default")]
    pub modules: Vec<ModuleDto>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ModuleDto {
    #[serde(default, alias = "_id", deserialize_with = "lenient_id")]
    pub id: String,
    #[serde(default, alias = "module_name", deserialize_with = "or_default")]
    pub name: String,
    #[serde(default, alias = "module_order")]
    pub order: Option<i32>,
    #[serde(default, deserialize_with = "or_default")]
    pub topics: Vec<TopicDto>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TopicDto {
    #[serde(default, alias = "_id", deserialize_with = "lenient_id")]
    pub id: String,
    #[serde(default, alias = "topic_name", deserialize_with = "or_default")]
    pub name: String,
    #[serde(default, alias = "topic_order")]
    pub order: Option<i32>,
    #[serde(default, alias = "subTopics", deserialize_with = "or_default")]
    pub sub_topics: Vec<SubTopicDto>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SubTopicDto {
    #[serde(default, alias = "_id", deserialize_with = "lenient_id")]
    pub id: String,
    #[serde(default, alias = "sub_topic_name", deserialize_with = "or_default")]
    pub name: String,
    #[serde(default, alias = "sub_topic_order")]
    pub order: Option<i32>,
    #[serde(default, alias = "lectureNumber")]
    pub lecture_number: Option<i32>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, alias = "planned_start", alias = "plannedStartDate")]
    pub planned_start_date: Option<String>,
    #[serde(default, alias = "planned_end", alias = "plannedEndDate")]
    pub planned_end_date: Option<String>,
    #[serde(default, alias = "actual_start", alias = "actualStartDate")]
    pub actual_start_date: Option<String>,
    #[serde(default, alias = "actual_end", alias = "actualEndDate")]
    pub actual_end_date: Option<String>,
}

/// `PATCH sub-topic/{id}/status` body. Both dates are always sent, as `null`
/// when unset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: String,
    pub actual_start_date: Option<DateTime<Utc>>,
    pub actual_end_date: Option<DateTime<Utc>>,
}

impl StatusUpdateRequest {
    pub fn from_row(row: &Row) -> Self {
        Self {
            status: to_external(row.status).to_string(),
            actual_start_date: row.actual_start,
            actual_end_date: row.actual_end,
        }
    }
}

pub fn to_external(status: Status) -> &'static str {
    match status {
        Status::Pending => "PENDING",
        Status::InProgress => "IN_PROGRESS",
        Status::Completed => "COMPLETED",
    }
}

pub fn from_external(token: &str) -> Option<Status> {
    match token.trim().to_ascii_uppercase().as_str() {
        "PENDING" => Some(Status::Pending),
        "IN_PROGRESS" => Some(Status::InProgress),
        "COMPLETED" => Some(Status::Completed),
        _ => None,
    }
}

/// RFC 3339 or a bare `YYYY-MM-DD`, read as midnight UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

impl SubjectDto {
    /// Convert into the domain tree, ordering children by their `order` index.
    /// `requested_id` fills in a subject id the backend left out.
    pub fn into_subject(self, requested_id: &str) -> Subject {
        let mut modules: Vec<Module> = self.modules.into_iter().map(ModuleDto::into_module).collect();
        modules.sort_by_key(|m| m.order);

        Subject {
            id: if self.id.is_empty() { requested_id.to_string() } else { self.id },
            name: self.name,
            modules,
        }
    }
}

impl ModuleDto {
    fn into_module(self) -> Module {
        let mut topics: Vec<Topic> = self.topics.into_iter().map(TopicDto::into_topic).collect();
        topics.sort_by_key(|t| t.order);

        Module {
            id: self.id,
            name: self.name,
            order: self.order.unwrap_or(0),
            topics,
        }
    }
}

impl TopicDto {
    fn into_topic(self) -> Topic {
        let mut sub_topics: Vec<SubTopic> = self
            .sub_topics
            .into_iter()
            .map(SubTopicDto::into_sub_topic)
            .collect();
        sub_topics.sort_by_key(|s| s.order);

        Topic {
            id: self.id,
            name: self.name,
            order: self.order.unwrap_or(0),
            sub_topics,
        }
    }
}

impl SubTopicDto {
    fn into_sub_topic(self) -> SubTopic {
        let status = match self.status.as_deref() {
            Some(token) => from_external(token).unwrap_or_else(|| {
                warn!("unknown status {:?} on sub-topic {}, treating as pending", token, self.id);
                Status::Pending
            }),
            None => Status::Pending,
        };

        let date = |field: &str, raw: Option<&str>| {
            let raw = raw?;
            let parsed = parse_timestamp(raw);
            if parsed.is_none() && !raw.trim().is_empty() {
                warn!("unparseable {} {:?} on sub-topic {}", field, raw, self.id);
            }
            parsed
        };

        let planned_start = date("planned_start_date", self.planned_start_date.as_deref());
        let planned_end = date("planned_end_date", self.planned_end_date.as_deref());
        let mut actual_start = date("actual_start_date", self.actual_start_date.as_deref());
        let mut actual_end = date("actual_end_date", self.actual_end_date.as_deref());

        // actual_end only when completed, no actual dates at all when pending
        if status != Status::Completed && actual_end.is_some() {
            warn!("dropping actual_end_date on {:?} sub-topic {}", status, self.id);
            actual_end = None;
        }
        if status == Status::Pending && actual_start.is_some() {
            warn!("dropping actual_start_date on pending sub-topic {}", self.id);
            actual_start = None;
        }

        SubTopic {
            id: self.id,
            name: self.name,
            order: self.order.unwrap_or(0),
            lecture_number: self.lecture_number,
            status,
            planned_start,
            planned_end,
            actual_start,
            actual_end,
        }
    }
}

fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn lenient_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => s,
        serde_json::Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}
