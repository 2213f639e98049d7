use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use common::model::address::Address;
use common::model::city::City;
use common::model::fire_station::FireStation;
use common::model::medication::Medication;
use common::model::person::Person;
use common::model::variant::ServiceVariant;
use common::responses::{ChildAlert, CommunityResident, PersonInfoRecord, StationCoverage, WithPeople};
use safetynet::services::{self, AppState};
use safetynet::SqliteStore;
use serde_json::{json, Value};

fn state() -> web::Data<AppState> {
    web::Data::new(AppState::new(SqliteStore::open_in_memory().unwrap()))
}

macro_rules! service_for {
    ($variant:expr) => {
        test::init_service(
            App::new()
                .app_data(state())
                .configure(services::configure($variant)),
        )
        .await
    };
}

macro_rules! send {
    ($app:expr, $req:expr) => {
        test::call_service($app, $req.to_request())
    };
}

macro_rules! post {
    ($app:expr, $uri:expr, $body:expr) => {
        send!($app, test::TestRequest::post().uri($uri).set_json($body))
    };
}

macro_rules! put {
    ($app:expr, $uri:expr, $body:expr) => {
        send!($app, test::TestRequest::put().uri($uri).set_json($body))
    };
}

macro_rules! get {
    ($app:expr, $uri:expr) => {
        send!($app, test::TestRequest::get().uri($uri))
    };
}

macro_rules! delete {
    ($app:expr, $uri:expr) => {
        send!($app, test::TestRequest::delete().uri($uri))
    };
}

fn resident(first_name: &str, age: i32) -> Value {
    json!({
        "firstName": first_name,
        "lastName": "Doe",
        "phoneNumber": "555-0100",
        "age": age,
        "address": "1 Main St",
        "email": format!("{}@example.com", first_name.to_lowercase()),
    })
}

fn resident_of(first_name: &str, age: i32, parent_field: &str, parent_id: i64) -> Value {
    let mut body = resident(first_name, age);
    body[parent_field] = json!(parent_id);
    body
}

#[actix_web::test]
async fn fire_station_counts_adults_above_eighteen() {
    let app = service_for!(ServiceVariant::FireStation);
    let resp = post!(&app, "/firestation", json!({"stationNumber": 4, "address": "1 Main St"})).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let station: FireStation = test::read_body_json(resp).await;
    let station_id = station.id.unwrap();

    for (name, age) in [("Kid", 10), ("Teen", 18), ("Adult", 25)] {
        let resp = post!(&app, "/person", resident_of(name, age, "fireStationId", station_id)).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    let resp = get!(&app, "/firestation?stationNumber=4").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let coverage: StationCoverage = test::read_body_json(resp).await;
    assert_eq!(coverage.people.len(), 3);
    assert_eq!(coverage.adult_count, 1);
    assert_eq!(coverage.child_count, 2);

    let resp = get!(&app, "/firestation?stationNumber=9").await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn child_alert_distinguishes_unknown_address_from_adults_only() {
    let app = service_for!(ServiceVariant::ChildAlert);
    let resp = post!(&app, "/childAlert", json!({"address": "1 Main St"})).await;
    let address: Address = test::read_body_json(resp).await;
    post!(&app, "/person", resident_of("Grown", 40, "addressId", address.id.unwrap())).await;

    let resp = get!(&app, "/childAlert?address=1%20Main%20St").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let alert: ChildAlert = test::read_body_json(resp).await;
    assert!(alert.people.is_empty());

    let resp = get!(&app, "/childAlert?address=2%20Side%20St").await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    post!(&app, "/person", resident_of("Small", 7, "addressId", address.id.unwrap())).await;
    let resp = get!(&app, "/childAlert?address=1%20Main%20St").await;
    let alert: ChildAlert = test::read_body_json(resp).await;
    assert_eq!(alert.people.len(), 1);
    assert_eq!(alert.people[0].first_name, "Small");
    assert_eq!(alert.people[0].age, 7);
}

#[actix_web::test]
async fn unknown_parent_rejects_person_without_saving() {
    let app = service_for!(ServiceVariant::ChildAlert);
    let resp = post!(&app, "/person", resident_of("Lost", 7, "addressId", 99)).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let people: Vec<Person> = test::read_body_json(get!(&app, "/person").await).await;
    assert!(people.is_empty());
}

#[actix_web::test]
async fn invalid_person_payload_is_rejected_with_field_message() {
    let app = service_for!(ServiceVariant::FireStation);
    let resp = post!(&app, "/firestation", json!({"stationNumber": 1, "address": "x"})).await;
    let station: FireStation = test::read_body_json(resp).await;

    let mut body = resident_of("Zero", 0, "fireStationId", station.id.unwrap());
    let resp = post!(&app, "/person", body.clone()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(test::read_body(resp).await, "age cannot be negative!");

    body["age"] = json!(30);
    body["address"] = Value::Null;
    let resp = post!(&app, "/person", body).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(test::read_body(resp).await, "address cannot be null!");
}

#[actix_web::test]
async fn updating_person_moves_it_between_addresses() {
    let app = service_for!(ServiceVariant::ChildAlert);
    let old: Address = test::read_body_json(post!(&app, "/childAlert", json!({"address": "Old Rd"})).await).await;
    let new: Address = test::read_body_json(post!(&app, "/childAlert", json!({"address": "New Rd"})).await).await;
    let person: Person = test::read_body_json(
        post!(&app, "/person", resident_of("Mover", 8, "addressId", old.id.unwrap())).await,
    )
    .await;

    let uri = format!("/person/{}", person.id.unwrap());
    let resp = put!(&app, &uri, resident_of("Mover", 9, "addressId", new.id.unwrap())).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let moved: Person = test::read_body_json(resp).await;
    assert_eq!(moved.id, person.id);
    assert_eq!(moved.parent_id, new.id);
    assert_eq!(moved.age, 9);

    assert_eq!(get!(&app, "/childAlert?address=Old%20Rd").await.status(), StatusCode::NOT_FOUND);
    let alert: ChildAlert = test::read_body_json(get!(&app, "/childAlert?address=New%20Rd").await).await;
    assert_eq!(alert.people.len(), 1);
}

#[actix_web::test]
async fn missing_ids_in_path_are_not_found() {
    let app = service_for!(ServiceVariant::ChildAlert);
    let address: Address = test::read_body_json(post!(&app, "/childAlert", json!({"address": "x"})).await).await;

    let resp = put!(&app, "/person/42", resident_of("Ghost", 5, "addressId", address.id.unwrap())).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(delete!(&app, "/person/42").await.status(), StatusCode::NOT_FOUND);
    assert_eq!(delete!(&app, "/childAlert/42").await.status(), StatusCode::NOT_FOUND);
    let resp = put!(&app, "/childAlert/42", json!({"address": "y"})).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn deleting_person_twice_reports_not_found() {
    let app = service_for!(ServiceVariant::FireStation);
    let station: FireStation =
        test::read_body_json(post!(&app, "/firestation", json!({"stationNumber": 2, "address": "x"})).await).await;
    let person: Person = test::read_body_json(
        post!(&app, "/person", resident_of("Once", 30, "fireStationId", station.id.unwrap())).await,
    )
    .await;

    let uri = format!("/person/{}", person.id.unwrap());
    assert_eq!(delete!(&app, &uri).await.status(), StatusCode::NO_CONTENT);
    assert_eq!(delete!(&app, &uri).await.status(), StatusCode::NOT_FOUND);
    assert_eq!(get!(&app, "/firestation?stationNumber=2").await.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn deleting_city_deletes_its_residents() {
    let app = service_for!(ServiceVariant::CommunityEmail);
    assert_eq!(get!(&app, "/city").await.status(), StatusCode::NOT_FOUND);

    let resp = post!(&app, "/city", json!({"name": "Culver", "population": 5000, "areaCode": "97451"})).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let city: City = test::read_body_json(resp).await;
    for name in ["Ann", "Ben"] {
        let resp = post!(&app, "/communityEmail", resident_of(name, 30, "cityId", city.id.unwrap())).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    let residents: Vec<CommunityResident> =
        test::read_body_json(get!(&app, "/communityEmail?city=Culver").await).await;
    let emails: Vec<&str> = residents.iter().map(|r| r.email.as_str()).collect();
    assert_eq!(emails, vec!["ann@example.com", "ben@example.com"]);

    let cities: Vec<WithPeople<City>> = test::read_body_json(get!(&app, "/city").await).await;
    assert_eq!(cities.len(), 1);
    assert_eq!(cities[0].people.len(), 2);

    let uri = format!("/city/{}", city.id.unwrap());
    assert_eq!(delete!(&app, &uri).await.status(), StatusCode::NO_CONTENT);
    assert_eq!(get!(&app, "/communityEmail?city=Culver").await.status(), StatusCode::NOT_FOUND);
    assert_eq!(get!(&app, "/city").await.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn person_info_tracks_medication_edges_both_ways() {
    let app = service_for!(ServiceVariant::PersonInfo);
    assert_eq!(get!(&app, "/medication").await.status(), StatusCode::NOT_FOUND);

    let aspirin: Medication =
        test::read_body_json(post!(&app, "/medication", json!({"name": "Aspirin", "dosage": "100mg"})).await).await;
    let aspirin_id = aspirin.id.unwrap();

    let mut body = resident("Pat", 50);
    body["allergies"] = json!(["pollen"]);
    body["medicationIds"] = json!([aspirin_id, 999]);
    let resp = post!(&app, "/personinfo", body.clone()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    body["medicationIds"] = json!([aspirin_id]);
    let resp = post!(&app, "/personinfo", body.clone()).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let person: Person = test::read_body_json(resp).await;

    let records: Vec<PersonInfoRecord> =
        test::read_body_json(get!(&app, "/personinfo?firstName=Pat&lastName=Doe").await).await;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].allergies, vec!["pollen".to_string()]);
    assert_eq!(records[0].medications, vec![aspirin.clone()]);

    let listing: Vec<WithPeople<Medication>> = test::read_body_json(get!(&app, "/medication").await).await;
    assert_eq!(listing[0].people.len(), 1);

    let uri = format!("/personinfo/{}", person.id.unwrap());
    body["medicationIds"] = json!([]);
    assert_eq!(put!(&app, &uri, body).await.status(), StatusCode::OK);

    let listing: Vec<WithPeople<Medication>> = test::read_body_json(get!(&app, "/medication").await).await;
    assert!(listing[0].people.is_empty());
    let records: Vec<PersonInfoRecord> =
        test::read_body_json(get!(&app, "/personinfo?firstName=Pat&lastName=Doe").await).await;
    assert!(records[0].medications.is_empty());
}

#[actix_web::test]
async fn deleting_medication_keeps_its_holders() {
    let app = service_for!(ServiceVariant::PersonInfo);
    let med: Medication =
        test::read_body_json(post!(&app, "/medication", json!({"name": "Insulin", "dosage": "10u"})).await).await;
    let mut body = resident("Sam", 61);
    body["medicationIds"] = json!([med.id.unwrap()]);
    let person: Person = test::read_body_json(post!(&app, "/personinfo", body).await).await;

    let uri = format!("/medication/{}", med.id.unwrap());
    assert_eq!(delete!(&app, &uri).await.status(), StatusCode::NO_CONTENT);

    let records: Vec<PersonInfoRecord> =
        test::read_body_json(get!(&app, "/personinfo?firstName=Sam&lastName=Doe").await).await;
    assert_eq!(records.len(), 1);
    assert!(records[0].medications.is_empty());

    let uri = format!("/personinfo/{}", person.id.unwrap());
    assert_eq!(delete!(&app, &uri).await.status(), StatusCode::NO_CONTENT);
    assert_eq!(
        get!(&app, "/personinfo?firstName=Sam&lastName=Doe").await.status(),
        StatusCode::NOT_FOUND
    );
}

#[actix_web::test]
async fn person_info_update_without_lists_keeps_medications_and_allergies() {
    let app = service_for!(ServiceVariant::PersonInfo);
    let med: Medication =
        test::read_body_json(post!(&app, "/medication", json!({"name": "Statin", "dosage": "20mg"})).await).await;
    let mut body = resident("Kim", 55);
    body["allergies"] = json!(["latex"]);
    body["medicationIds"] = json!([med.id.unwrap()]);
    let person: Person = test::read_body_json(post!(&app, "/personinfo", body).await).await;

    let uri = format!("/personinfo/{}", person.id.unwrap());
    let mut update = resident("Kim", 56);
    update["phoneNumber"] = json!("555-0199");
    let resp = put!(&app, &uri, update).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Person = test::read_body_json(resp).await;
    assert_eq!(updated.age, 56);
    assert_eq!(updated.phone_number, "555-0199");
    assert_eq!(updated.medication_ids, person.medication_ids);
    assert_eq!(updated.allergies, vec!["latex".to_string()]);

    let records: Vec<PersonInfoRecord> =
        test::read_body_json(get!(&app, "/personinfo?firstName=Kim&lastName=Doe").await).await;
    assert_eq!(records[0].medications, vec![med]);
    assert_eq!(records[0].allergies, vec!["latex".to_string()]);
}

#[actix_web::test]
async fn person_info_update_with_unknown_medication_keeps_current_set() {
    let app = service_for!(ServiceVariant::PersonInfo);
    let med: Medication =
        test::read_body_json(post!(&app, "/medication", json!({"name": "Statin", "dosage": "20mg"})).await).await;
    let mut body = resident("Lou", 44);
    body["medicationIds"] = json!([med.id.unwrap()]);
    let person: Person = test::read_body_json(post!(&app, "/personinfo", body.clone()).await).await;

    let uri = format!("/personinfo/{}", person.id.unwrap());
    body["medicationIds"] = json!([999]);
    assert_eq!(put!(&app, &uri, body).await.status(), StatusCode::BAD_REQUEST);

    let records: Vec<PersonInfoRecord> =
        test::read_body_json(get!(&app, "/personinfo?firstName=Lou&lastName=Doe").await).await;
    assert_eq!(records[0].medications, vec![med]);
}

#[actix_web::test]
async fn moving_person_to_unknown_parent_keeps_current_parent() {
    let app = service_for!(ServiceVariant::FireStation);
    let station: FireStation =
        test::read_body_json(post!(&app, "/firestation", json!({"stationNumber": 3, "address": "x"})).await).await;
    let person: Person = test::read_body_json(
        post!(&app, "/person", resident_of("Stay", 33, "fireStationId", station.id.unwrap())).await,
    )
    .await;

    let uri = format!("/person/{}", person.id.unwrap());
    let resp = put!(&app, &uri, resident_of("Stay", 34, "fireStationId", 999)).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let people: Vec<Person> = test::read_body_json(get!(&app, "/person").await).await;
    assert_eq!(people.len(), 1);
    assert_eq!(people[0].parent_id, station.id);
    assert_eq!(people[0].age, 33);
    let coverage: StationCoverage =
        test::read_body_json(get!(&app, "/firestation?stationNumber=3").await).await;
    assert_eq!(coverage.people.len(), 1);
}
