use chrono::NaiveDate;
use flexiride_types::{
    Booking, BookingId, BookingRequest, BookingStatus, Vehicle, VehicleFilterParams, VehicleId,
    VehicleType, VehicleUpdate,
};
use pretty_assertions::assert_eq;
use std::str::FromStr;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ── Identifiers ───────────────────────────────────────────────────

const VEHICLE: &str = "0b6f1d2e-5c3a-4f43-9a57-3f1f0f1c2d11";

#[test]
fn vehicle_id_display_and_parse() {
    let id = VehicleId::parse(VEHICLE).unwrap();
    assert_eq!(id.to_string(), VEHICLE);
    assert_eq!(VehicleId::from_str(&format!(" {VEHICLE} ")).unwrap(), id);
}

#[test]
fn vehicle_id_is_a_bare_json_string() {
    let id: VehicleId = serde_json::from_str(&format!("\"{VEHICLE}\"")).unwrap();
    assert_eq!(serde_json::to_value(id).unwrap(), serde_json::json!(VEHICLE));
}

#[test]
fn booking_id_parse_invalid() {
    let err = BookingId::parse("not-a-uuid").unwrap_err();
    assert!(format!("{err}").contains("invalid UUID"));
}

// ── Vehicles ──────────────────────────────────────────────────────

#[test]
fn vehicle_parses_api_payload() {
    let json = r#"{
        "id": "0b6f1d2e-5c3a-4f43-9a57-3f1f0f1c2d11",
        "name": "Classic 350",
        "brand": "Royal Enfield",
        "model": "Classic",
        "type": "2-Wheeler",
        "pricePerDay": 1200.0,
        "advance": 500,
        "imageUrl": "https://img.example/classic.png"
    }"#;
    let vehicle: Vehicle = serde_json::from_str(json).unwrap();
    assert_eq!(vehicle.vehicle_type, VehicleType::TwoWheeler);
    assert_eq!(vehicle.price_per_day, 1200.0);
    assert_eq!(vehicle.advance, 500.0);
    assert_eq!(vehicle.image_url, "https://img.example/classic.png");
}

#[test]
fn vehicle_update_uses_camel_case() {
    let update = VehicleUpdate {
        name: "Swift".into(),
        brand: "Maruti".into(),
        model: "Swift".into(),
        vehicle_type: VehicleType::FourWheeler,
        price_per_day: 2500.0,
        advance: 1000.0,
        image_url: "https://img.example/swift.png".into(),
    };
    let value = serde_json::to_value(&update).unwrap();
    assert_eq!(value["type"], "4-Wheeler");
    assert_eq!(value["pricePerDay"], 2500.0);
    assert_eq!(value["imageUrl"], "https://img.example/swift.png");
}

#[test]
fn vehicle_type_from_str() {
    assert_eq!(VehicleType::from_str("4-wheeler").unwrap(), VehicleType::FourWheeler);
    assert_eq!(VehicleType::from_str("2").unwrap(), VehicleType::TwoWheeler);
    assert!(VehicleType::from_str("truck").is_err());
}

#[test]
fn filter_params_default_sends_empty_lists_only() {
    let value = serde_json::to_value(VehicleFilterParams::default()).unwrap();
    assert_eq!(
        value,
        serde_json::json!({"brands": [], "models": [], "types": []})
    );
}

#[test]
fn filter_params_dates_use_iso_day() {
    let params = VehicleFilterParams {
        types: vec![VehicleType::TwoWheeler],
        start_price: Some(100.0),
        start_date: Some(date(2025, 3, 1)),
        end_date: Some(date(2025, 3, 4)),
        ..Default::default()
    };
    let value = serde_json::to_value(&params).unwrap();
    assert_eq!(value["types"], serde_json::json!(["2-Wheeler"]));
    assert_eq!(value["startPrice"], 100.0);
    assert_eq!(value["startDate"], "2025-03-01");
    assert_eq!(value["endDate"], "2025-03-04");
    assert!(value.get("endPrice").is_none());
}

// ── Bookings ──────────────────────────────────────────────────────

#[test]
fn booking_parses_awaiting_return() {
    let json = r#"{
        "id": "5d2a8f0e-1b7c-4c3e-8d5a-2e9b0c7f6a41",
        "userId": "1",
        "vehicleId": "0b6f1d2e-5c3a-4f43-9a57-3f1f0f1c2d11",
        "startDate": "2025-03-01",
        "endDate": "2025-03-03",
        "totalPrice": 3600.0,
        "status": "AWAITING RETURN",
        "createdAt": "2025-02-20T10:15:00"
    }"#;
    let booking: Booking = serde_json::from_str(json).unwrap();
    assert_eq!(booking.status, BookingStatus::AwaitingReturn);
    assert_eq!(booking.days(), 3);
    assert_eq!(booking.created_at, "2025-02-20T10:15:00");
}

#[test]
fn booking_days_accept_timestamps() {
    let json = r#"{
        "id": "5d2a8f0e-1b7c-4c3e-8d5a-2e9b0c7f6a41",
        "userId": "1",
        "vehicleId": "0b6f1d2e-5c3a-4f43-9a57-3f1f0f1c2d11",
        "startDate": "2025-03-01T00:00:00",
        "endDate": "2025-03-03 18:30:00",
        "totalPrice": 3600.0,
        "status": "ACTIVE",
        "createdAt": "2025-02-20T10:15:00Z"
    }"#;
    let booking: Booking = serde_json::from_str(json).unwrap();
    assert_eq!(booking.start_date, date(2025, 3, 1));
    assert_eq!(booking.end_date, date(2025, 3, 3));
    assert_eq!(booking.days(), 3);

    let value = serde_json::to_value(&booking).unwrap();
    assert_eq!(value["startDate"], "2025-03-01");
    assert_eq!(value["endDate"], "2025-03-03");
}

#[test]
fn booking_days_reject_garbage() {
    for bad in ["2025-03", "2025-03-01X", "03/01/2025", "2025-02-30"] {
        let json = serde_json::json!({
            "id": "5d2a8f0e-1b7c-4c3e-8d5a-2e9b0c7f6a41",
            "userId": "1",
            "vehicleId": VEHICLE,
            "startDate": bad,
            "endDate": "2025-03-03",
            "totalPrice": 1.0,
            "status": "ACTIVE",
            "createdAt": ""
        });
        assert!(serde_json::from_value::<Booking>(json).is_err(), "{bad}");
    }
}

#[test]
fn booking_status_from_str_accepts_variants() {
    assert_eq!(
        BookingStatus::from_str("awaiting_return").unwrap(),
        BookingStatus::AwaitingReturn
    );
    assert_eq!(BookingStatus::from_str("Active").unwrap(), BookingStatus::Active);
    assert!(BookingStatus::from_str("lost").is_err());
}

#[test]
fn booking_request_wire_shape() {
    let vehicle_id = VehicleId::parse(VEHICLE).unwrap();
    let request = BookingRequest {
        email: "u@x.com".into(),
        vehicle_id,
        start_date: date(2025, 3, 1),
        end_date: date(2025, 3, 2),
    };
    let value = serde_json::to_value(&request).unwrap();
    assert_eq!(
        value,
        serde_json::json!({
            "email": "u@x.com",
            "vehicleId": vehicle_id.to_string(),
            "startDate": "2025-03-01",
            "endDate": "2025-03-02",
        })
    );
}
