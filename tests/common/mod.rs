#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use tokio::sync::Semaphore;

use cpr_tracker::client::{CprClient, dto::StatusUpdateRequest};
use cpr_tracker::error::AppError;
use cpr_tracker::models::{Module, Status, SubTopic, Subject, Topic};

pub fn at(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, day, hour, 0, 0).unwrap()
}

pub fn sub_topic(id: &str, order: i32) -> SubTopic {
    SubTopic {
        id: id.to_string(),
        name: format!("Sub-topic {}", id),
        order,
        lecture_number: Some(order + 1),
        status: Status::Pending,
        planned_start: Some(at(1, 9)),
        planned_end: Some(at(5, 17)),
        actual_start: None,
        actual_end: None,
    }
}

pub fn topic(id: &str, sub_topics: Vec<SubTopic>) -> Topic {
    Topic {
        id: id.to_string(),
        name: format!("Topic {}", id),
        order: 0,
        sub_topics,
    }
}

pub fn module(id: &str, topics: Vec<Topic>) -> Module {
    Module {
        id: id.to_string(),
        name: format!("Module {}", id),
        order: 0,
        topics,
    }
}

/// Module m1 holds topics of 2 and 3 sub-topics, m2 one sub-topic plus an
/// empty topic, m3 nothing at all.
pub fn sample_subject() -> Subject {
    Subject {
        id: "subj-1".to_string(),
        name: "Data Structures".to_string(),
        modules: vec![
            module(
                "m1",
                vec![
                    topic("t1", vec![sub_topic("s1", 0), sub_topic("s2", 1)]),
                    topic(
                        "t2",
                        vec![sub_topic("s3", 0), sub_topic("s4", 1), sub_topic("s5", 2)],
                    ),
                ],
            ),
            module(
                "m2",
                vec![topic("t3", vec![sub_topic("s6", 0)]), topic("t4", vec![])],
            ),
            module("m3", vec![]),
        ],
    }
}

#[derive(Default)]
pub struct FakeClient {
    pub subjects: HashMap<String, Subject>,
    pub fail_on: Option<String>,
    pub attempts: Mutex<Vec<String>>,
    pub applied: Mutex<Vec<(String, StatusUpdateRequest)>>,
}

impl FakeClient {
    pub fn with_subject(subject: Subject) -> Self {
        let mut subjects = HashMap::new();
        subjects.insert(subject.id.clone(), subject);
        Self {
            subjects,
            ..Self::default()
        }
    }

    pub fn failing_on(mut self, sub_topic_id: &str) -> Self {
        self.fail_on = Some(sub_topic_id.to_string());
        self
    }

    pub fn attempts(&self) -> Vec<String> {
        self.attempts.lock().unwrap().clone()
    }

    pub fn applied(&self) -> Vec<(String, StatusUpdateRequest)> {
        self.applied.lock().unwrap().clone()
    }
}

#[async_trait]
impl CprClient for FakeClient {
    async fn fetch_subject(&self, subject_id: &str) -> Result<Subject, AppError> {
        self.subjects
            .get(subject_id)
            .cloned()
            .ok_or_else(|| AppError::Upstream(format!("subject {} not found", subject_id)))
    }

    async fn update_sub_topic_status(
        &self,
        sub_topic_id: &str,
        update: &StatusUpdateRequest,
    ) -> Result<(), AppError> {
        self.attempts.lock().unwrap().push(sub_topic_id.to_string());
        if self.fail_on.as_deref() == Some(sub_topic_id) {
            return Err(AppError::Upstream("503 Service Unavailable".to_string()));
        }
        self.applied
            .lock()
            .unwrap()
            .push((sub_topic_id.to_string(), update.clone()));
        Ok(())
    }
}

/// Holds every status update until `release` hands out permits.
pub struct GatedClient {
    pub subject: Subject,
    pub gate: Semaphore,
    pub applied: AtomicUsize,
}

impl GatedClient {
    pub fn new(subject: Subject) -> Self {
        Self {
            subject,
            gate: Semaphore::new(0),
            applied: AtomicUsize::new(0),
        }
    }

    pub fn release(&self, updates: usize) {
        self.gate.add_permits(updates);
    }

    pub fn applied(&self) -> usize {
        self.applied.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CprClient for GatedClient {
    async fn fetch_subject(&self, _subject_id: &str) -> Result<Subject, AppError> {
        Ok(self.subject.clone())
    }

    async fn update_sub_topic_status(
        &self,
        _sub_topic_id: &str,
        _update: &StatusUpdateRequest,
    ) -> Result<(), AppError> {
        self.gate
            .acquire()
            .await
            .map_err(|e| AppError::Upstream(e.to_string()))?
            .forget();
        self.applied.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
