use std::collections::HashMap;
use std::hash::Hash;

use tracefold_record::Record;

/// Partition `records` by a caller-supplied key function.
///
/// Pure function, fresh state per invocation. Group order is the insertion
/// order of each key's first occurrence; within a group, records keep
/// their input order. No group is ever empty.
pub fn group_by<K, F>(records: Vec<Record>, key_fn: F) -> Vec<(K, Vec<Record>)>
where
    K: Eq + Hash + Clone,
    F: Fn(&Record) -> K,
{
    let mut groups: Vec<(K, Vec<Record>)> = Vec::new();
    let mut index: HashMap<K, usize> = HashMap::new();

    for record in records {
        let key = key_fn(&record);
        match index.get(&key) {
            Some(&slot) => groups[slot].1.push(record),
            None => {
                index.insert(key.clone(), groups.len());
                groups.push((key, vec![record]));
            }
        }
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use tracefold_types::{Audit, EventTime, FieldValue, OriginId};

    fn record(respondent: &str, message: &str) -> Record {
        let mut writes = BTreeMap::new();
        writes.insert("avf_phone_id".to_string(), FieldValue::from(respondent));
        writes.insert("message".to_string(), FieldValue::from(message));
        let mut r = Record::new(OriginId::new());
        r.append(
            writes,
            Audit::at("test_user", "group::tests", EventTime::from_millis(1)),
        );
        r
    }

    fn respondent_key(r: &Record) -> String {
        r.get("avf_phone_id")
            .and_then(FieldValue::as_str)
            .unwrap_or_default()
            .to_string()
    }

    #[test]
    fn groups_follow_first_occurrence_order() {
        let records = vec![
            record("b", "1"),
            record("a", "2"),
            record("b", "3"),
            record("c", "4"),
            record("a", "5"),
        ];

        let groups = group_by(records, respondent_key);

        let keys: Vec<&str> = groups.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
    }

    #[test]
    fn members_keep_input_order() {
        let records = vec![record("x", "first"), record("x", "second"), record("x", "third")];

        let groups = group_by(records, respondent_key);

        assert_eq!(groups.len(), 1);
        let messages: Vec<&FieldValue> = groups[0]
            .1
            .iter()
            .map(|r| r.get("message").unwrap())
            .collect();
        assert_eq!(
            messages,
            vec![
                &FieldValue::from("first"),
                &FieldValue::from("second"),
                &FieldValue::from("third"),
            ]
        );
    }

    #[test]
    fn empty_input_produces_no_groups() {
        let groups = group_by(Vec::new(), respondent_key);
        assert!(groups.is_empty());
    }

    #[test]
    fn no_group_is_empty() {
        let records = vec![record("a", "1"), record("b", "2")];
        let groups = group_by(records, respondent_key);
        assert!(groups.iter().all(|(_, members)| !members.is_empty()));
    }
}
