//! End-to-end tests for `create`: synthesis, caching and initialization.

use std::sync::Arc;

use dynview_core::synth::{BaseType, MetadataKey, PropertySpec, SynthError, TypeRegistry};
use dynview_core::{Value, ValueType, create};

fn base() -> BaseType {
    BaseType::dynamic_view_model()
}

#[test]
fn test_build_type_without_properties() {
    let registry = TypeRegistry::new();
    let dvm = registry.create(&base(), "MyCompany", "MyCompany.MyDynamicViewModel_2", &[]).unwrap();

    assert_eq!(dvm.type_info().name(), "MyCompany.MyDynamicViewModel_2");
    assert_eq!(dvm.type_info().namespace(), "MyCompany");
    assert!(dvm.type_info().property("FirstName").is_none());
}

#[test]
fn test_build_type_with_initial_value() {
    let registry = TypeRegistry::new();
    let specs = vec![PropertySpec::text("FirstName").with_initial_value("Joe")];
    let dvm = registry.create(&base(), "MyCompany", "MyCompany.MyDynamicViewModel_1", &specs).unwrap();

    assert!(dvm.type_info().property("FirstName").is_some());
    assert_eq!(dvm.get("FirstName").unwrap(), &Value::from("Joe"));
}

#[test]
fn test_build_type_with_annotations() {
    let registry = TypeRegistry::new();
    let specs = vec![
        PropertySpec::text("Comments")
            .with_order(7.0)
            .with_display_name("Comments here")
            .with_description("Please enter any comments here")
            .with_typical_length(40)
            .with_max_length(200)
            .with_multi_line(10, 20),
    ];
    let dvm = registry.create(&base(), "MyCompany", "MyCompany.MyDynamicViewModel_4", &specs).unwrap();

    let meta = dvm.type_info().property("Comments").unwrap().metadata();
    assert_eq!(meta.sequence().as_deref(), Some("7"));
    assert_eq!(meta.display_name(), Some("Comments here"));
    assert!(meta.contains(MetadataKey::Optionally));
    assert_eq!(meta.description(), Some("Please enter any comments here"));
    assert_eq!(meta.typical_length(), Some(40));
    assert_eq!(meta.max_length(), Some(200));
    let multi_line = meta.multi_line().unwrap();
    assert_eq!(multi_line.number_of_lines, 10);
    assert_eq!(multi_line.width, 20);
}

#[test]
fn test_build_type_with_choices() {
    let registry = TypeRegistry::new();
    let specs = vec![
        PropertySpec::text("PaymentMethod").with_choices(["Visa", "Mastercard", "Amex", "PayPal"]),
    ];
    let dvm = registry.create(&base(), "MyCompany", "MyCompany.MyDynamicViewModel_3", &specs).unwrap();

    assert!(dvm.type_info().property("PaymentMethod").is_some());
    assert!(dvm.type_info().method("choicesPaymentMethod").is_some());

    let choices = dvm.invoke("choicesPaymentMethod").unwrap();
    assert_eq!(choices[0], "Visa");
    assert_eq!(choices[1], "Mastercard");
    assert_eq!(choices, vec!["Visa", "Mastercard", "Amex", "PayPal"]);
}

#[test]
fn test_metadata_presence_for_every_property() {
    let registry = TypeRegistry::new();
    let specs = vec![
        PropertySpec::text("Name").mandatory(),
        PropertySpec::new("Age", ValueType::Integer),
        PropertySpec::new("Joined", ValueType::Date).with_display_name("Joined on"),
    ];
    let dvm = registry.create(&base(), "MyCompany", "MyCompany.Presence", &specs).unwrap();

    for (spec, property) in specs.iter().zip(dvm.type_info().properties()) {
        let meta = property.metadata();
        assert!(meta.contains(MetadataKey::DisplayName), "{}", spec.name);
        assert!(meta.contains(MetadataKey::MemberOrder), "{}", spec.name);
        assert_eq!(meta.is_optional(), !spec.mandatory, "{}", spec.name);
    }
}

#[test]
fn test_same_name_returns_cached_type() {
    let registry = TypeRegistry::new();
    let first = registry
        .create(&base(), "MyCompany", "MyCompany.Cached", &[PropertySpec::text("A")])
        .unwrap();
    let second = registry
        .create(
            &base(),
            "MyCompany",
            "MyCompany.Cached",
            &[PropertySpec::text("B"), PropertySpec::new("C", ValueType::Boolean)],
        )
        .unwrap();

    assert!(first.same_type(&second));
    assert!(second.type_info().has_property("A"));
    assert!(!second.type_info().has_property("B"));
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_cached_type_missing_initial_value_accessor() {
    let registry = TypeRegistry::new();
    registry
        .create(&base(), "MyCompany", "MyCompany.FirstWins", &[PropertySpec::text("A")])
        .unwrap();

    let err = registry
        .create(
            &base(),
            "MyCompany",
            "MyCompany.FirstWins",
            &[PropertySpec::text("B").with_initial_value("x")],
        )
        .unwrap_err();
    assert!(matches!(err, SynthError::AccessorResolution { .. }));
}

#[test]
fn test_distinct_names_give_distinct_types() {
    let registry = TypeRegistry::new();
    let specs = vec![PropertySpec::text("Name")];
    let a = registry.create(&base(), "MyCompany", "MyCompany.One", &specs).unwrap();
    let b = registry.create(&base(), "MyCompany", "MyCompany.Two", &specs).unwrap();

    assert!(!a.same_type(&b));
    assert!(!Arc::ptr_eq(a.type_info(), b.type_info()));
    assert_eq!(registry.type_names(), vec!["MyCompany.One", "MyCompany.Two"]);
}

#[test]
fn test_round_trip_on_other_instances() {
    let registry = TypeRegistry::new();
    let specs = vec![
        PropertySpec::text("Name"),
        PropertySpec::new("Count", ValueType::Integer),
        PropertySpec::new("Ratio", ValueType::Decimal),
        PropertySpec::new("Enabled", ValueType::Boolean),
    ];
    let mut created = registry.create(&base(), "MyCompany", "MyCompany.RoundTrip", &specs).unwrap();
    let mut other = created.type_info().new_instance();

    for instance in [&mut created, &mut other] {
        instance.set("Name", "Ada").unwrap();
        instance.set("Count", 3_i64).unwrap();
        instance.set("Ratio", 0.5).unwrap();
        instance.set("Enabled", true).unwrap();

        assert_eq!(instance.get("Name").unwrap(), &Value::from("Ada"));
        assert_eq!(instance.get("Count").unwrap(), &Value::Integer(3));
        assert_eq!(instance.get("Ratio").unwrap(), &Value::Decimal(0.5));
        assert_eq!(instance.get("Enabled").unwrap(), &Value::Boolean(true));
    }
}

#[test]
fn test_base_collision_is_rejected() {
    let registry = TypeRegistry::new();
    registry.create(&base(), "MyCompany", "MyCompany.Based", &[]).unwrap();

    let err = registry
        .create(&BaseType::new("Report"), "MyCompany", "MyCompany.Based", &[])
        .unwrap_err();
    assert!(matches!(err, SynthError::TypeNameCollision { .. }));
}

#[test]
fn test_invalid_specs_publish_nothing() {
    let registry = TypeRegistry::new();
    let specs = vec![
        PropertySpec::text("Name"),
        PropertySpec::new("Age", ValueType::Integer).with_multi_line_lines(3),
    ];

    let err = registry.create(&base(), "MyCompany", "MyCompany.Invalid", &specs).unwrap_err();
    assert!(matches!(err, SynthError::InvalidSpec { .. }));
    assert!(registry.lookup("MyCompany.Invalid").is_none());
    assert!(registry.is_empty());
}

#[test]
fn test_initial_value_mismatch_publishes_nothing() {
    let registry = TypeRegistry::new();
    let specs = vec![PropertySpec::new("Age", ValueType::Integer).with_initial_value(true)];

    let err = registry.create(&base(), "MyCompany", "MyCompany.Mismatch", &specs).unwrap_err();
    assert!(matches!(err, SynthError::InitialValueTypeMismatch { .. }));
    assert!(registry.is_empty());
}

#[test]
fn test_global_create_caches_by_name() {
    let specs = vec![PropertySpec::text("Title").with_initial_value("Hello")];
    let a = create(&base(), "GlobalTests", "GlobalTests.Cached", &specs).unwrap();
    let b = create(&base(), "GlobalTests", "GlobalTests.Cached", &specs).unwrap();

    assert!(a.same_type(&b));
    assert_eq!(b.get("Title").unwrap().as_text(), Some("Hello"));
    assert!(TypeRegistry::global().contains("GlobalTests.Cached"));
}
