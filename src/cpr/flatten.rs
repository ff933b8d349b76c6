use crate::models::{Row, Subject};

/// Flatten a subject tree into one row per sub-topic, in module, topic,
/// sub-topic order. Empty modules and topics produce no rows.
pub fn flatten(subject: &Subject) -> Vec<Row> {
    let mut rows = Vec::with_capacity(subject.sub_topic_count());

    for module in &subject.modules {
        let module_span: usize = module.topics.iter().map(|t| t.sub_topics.len()).sum();
        let mut first_in_module = true;

        for topic in &module.topics {
            let topic_span = topic.sub_topics.len();

            for (idx, sub_topic) in topic.sub_topics.iter().enumerate() {
                rows.push(Row {
                    sub_topic_id: sub_topic.id.clone(),
                    sub_topic_name: sub_topic.name.clone(),
                    order: sub_topic.order,
                    lecture_number: sub_topic.lecture_number,
                    module_id: module.id.clone(),
                    module_name: module.name.clone(),
                    topic_id: topic.id.clone(),
                    topic_name: topic.name.clone(),
                    module_span,
                    topic_span,
                    is_first_in_module: first_in_module,
                    is_first_in_topic: idx == 0,
                    status: sub_topic.status,
                    planned_start: sub_topic.planned_start,
                    planned_end: sub_topic.planned_end,
                    actual_start: sub_topic.actual_start,
                    actual_end: sub_topic.actual_end,
                });
                first_in_module = false;
            }
        }
    }

    rows
}
