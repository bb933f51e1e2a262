mod common;

use std::fs;

use pledge_ledger::{
    domain::{Period, PersonDraft},
    errors::LedgerError,
    ledger::{PeopleOrder, UNNAMED_PERSON},
    storage::{JsonStore, LedgerStore},
    views::AggregateReportView,
};

#[test]
fn people_and_contributions_survive_reopening() {
    let (store, base) = common::json_store();
    let ana = store
        .create_person(PersonDraft::new("Ana", "8888-0000", 10000.0))
        .unwrap();
    let period = Period::new(2026, 10).unwrap();
    store.upsert_contribution(ana.id, period, 4000.0).unwrap();
    drop(store);

    let reopened = JsonStore::open_with_clock(base.join("ledger.json"), common::fixed_clock()).unwrap();
    let people = reopened.list_people(PeopleOrder::NameAsc).unwrap();
    assert_eq!(people, vec![ana.clone()]);
    let paid = reopened.get_contribution(ana.id, period).unwrap().unwrap();
    assert_eq!(paid.amount, 4000.0);
}

#[test]
fn document_uses_camel_case_fields_and_month_keys() {
    let (store, base) = common::json_store();
    let ana = store
        .create_person(PersonDraft::new("Ana", "8888-0000", 10000.0))
        .unwrap();
    store
        .upsert_contribution(ana.id, Period::new(2026, 10).unwrap(), 4000.0)
        .unwrap();

    let json = fs::read_to_string(base.join("ledger.json")).unwrap();
    assert!(json.contains("\"promisedAmount\": 10000.0"));
    assert!(json.contains("\"2026-10\""));
}

#[test]
fn failed_write_leaves_state_untouched() {
    let (store, base) = common::json_store();
    store
        .create_person(PersonDraft::new("Ana", "1", 100.0))
        .unwrap();
    // A directory squatting on the staging file makes the next save fail.
    fs::create_dir(base.join("ledger.json.tmp")).unwrap();

    let err = store
        .create_person(PersonDraft::new("Beto", "2", 200.0))
        .expect_err("staging file is blocked");
    assert!(matches!(err, LedgerError::Io(_)));
    assert!(err.is_backend());

    let names: Vec<String> = store
        .list_people(PeopleOrder::NameAsc)
        .unwrap()
        .into_iter()
        .map(|p| p.name)
        .collect();
    assert_eq!(names, ["Ana"]);
}

#[test]
fn malformed_amounts_load_as_zero() {
    let base = common::temp_base();
    let path = base.join("ledger.json");
    let id = "6f1c9a3e-2b7d-4c55-9a1e-0d3b5f7c8e21";
    fs::write(
        &path,
        format!(
            r#"{{
  "schema_version": 1,
  "people": {{
    "{id}": {{
      "id": "{id}",
      "name": "Ana",
      "phone": "1",
      "promisedAmount": "mucho",
      "createdAt": "2026-10-01T00:00:00Z"
    }}
  }},
  "contributions": {{}}
}}"#
        ),
    )
    .unwrap();

    let store = JsonStore::open(path.clone()).unwrap();
    let people = store.list_people(PeopleOrder::NameAsc).unwrap();
    assert_eq!(people[0].promised_amount, 0.0);
}

#[test]
fn nameless_person_loads_and_reports_as_unnamed() {
    let base = common::temp_base();
    let path = base.join("ledger.json");
    let id = "0b9d2f4e-71c3-4a8e-b5d6-2c1f0e9a7b34";
    fs::write(
        &path,
        format!(
            r#"{{"schema_version":1,"people":{{"{id}":{{"id":"{id}","phone":"2222-0000","promisedAmount":3000,"createdAt":"2026-10-01T00:00:00Z"}}}},"contributions":{{}}}}"#
        ),
    )
    .unwrap();

    let store = JsonStore::open(path.clone()).unwrap();
    let people = store.list_people(PeopleOrder::NameAsc).unwrap();
    assert_eq!(people.len(), 1);
    assert_eq!(people[0].name, "");

    let mut view = AggregateReportView::new();
    let report = view.load(&store, Period::new(2026, 10).unwrap()).unwrap();
    assert_eq!(report.rows[0].name, UNNAMED_PERSON);
    assert_eq!(report.rows[0].name, "Sin nombre");
    assert_eq!(report.totals.pending_total, 3000.0);
}

#[test]
fn newer_schema_is_refused() {
    let base = common::temp_base();
    let path = base.join("ledger.json");
    fs::write(&path, r#"{"schema_version": 99, "people": {}, "contributions": {}}"#).unwrap();

    let err = JsonStore::open(path.clone()).err().expect("newer schema");
    assert!(matches!(err, LedgerError::Backend(_)));
}
