//! Integration tests for HAL document building against a real URL configuration.
//!
//! Tests cover:
//! 1. Link resolution (user-detail scenario, shorthand, query strings)
//! 2. Spec validation before any reversal
//! 3. The single-or-array rule for repeated rels
//! 4. Single resource documents (fatal self link, null fields)
//! 5. Collections (order, related owners, query pass-through)
//! 6. Absolute URLs and settings

use std::cell::Cell;
use std::collections::HashMap;

use serde::Serialize;
use serde_json::{json, Value};

use django_hal_core::{settings_loader, HalError, HalResult, Settings};
use django_hal_http::urls::pattern::path;
use django_hal_http::urls::resolver::{include, root, URLResolver};
use django_hal_http::{HttpRequest, UrlReverser};
use django_hal_serializers::{
    field, link, pattern, resolve_link, to_accessor, Collection, FieldAccessor, HalSerializer,
    ListMeta, ResolvedLink, RouteSpec, SerializerContext,
};

fn urls() -> URLResolver {
    let api = include(
        "api/",
        vec![
            path("users/", Some("user-list")).unwrap().into(),
            path("users/<int:pk>/", Some("user-detail")).unwrap().into(),
            path("users/<int:pk>/emails/", Some("user-email-list")).unwrap().into(),
            path("users/<int:user_pk>/emails/<int:pk>/", Some("user-email-detail"))
                .unwrap()
                .into(),
            path("groups/<slug:slug>/", Some("group-detail")).unwrap().into(),
            path("search/", Some("search")).unwrap().into(),
        ],
        Some("api"),
        None,
    )
    .unwrap();
    root(vec![
        path("users/<int:pk>/", Some("user-detail")).unwrap().into(),
        api.into(),
    ])
    .unwrap()
}

struct User {
    pk: i64,
    username: String,
    group: Option<String>,
}

impl FieldAccessor for User {
    fn attribute(&self, name: &str) -> Option<Value> {
        match name {
            "pk" => Some(json!(self.pk)),
            "username" => Some(json!(self.username)),
            "group" => Some(json!(self.group)),
            _ => None,
        }
    }
}

#[derive(Serialize)]
struct Email {
    pk: i64,
    user_id: i64,
    address: String,
}

fn alice() -> User {
    User {
        pk: 42,
        username: "alice".to_string(),
        group: Some("admins".to_string()),
    }
}

fn emails() -> Vec<serde_json::Map<String, Value>> {
    [(1, "a@example.com"), (2, "b@example.com"), (3, "c@example.com")]
        .into_iter()
        .map(|(pk, address)| {
            to_accessor(&Email {
                pk,
                user_id: 42,
                address: address.to_string(),
            })
            .unwrap()
        })
        .collect()
}

fn email_serializer() -> HalSerializer {
    HalSerializer::new(RouteSpec::new(
        "api:user-email-detail",
        [("user_pk", "user_id"), ("pk", "pk")],
    ))
    .with_field(field("address"))
    .with_list(
        ListMeta::new(("api:user-email-list", "pk"))
            .with_resource_name("emails")
            .with_profile("email"),
    )
}

// ============================================================================
// 1. Link resolution
// ============================================================================

#[test]
fn test_user_detail_self_link_scenario() {
    let urls = urls();
    let settings = Settings::default();
    let ctx = SerializerContext::new(&urls, &settings);

    let spec = link("self").with_pattern(pattern("user-detail").with_kwargs("pk"));
    let resolved = resolve_link(&spec, &alice(), &ctx).unwrap().unwrap();
    assert_eq!(resolved, ResolvedLink::new("/users/42/"));

    let doc = HalSerializer::new(RouteSpec::detail("user-detail"))
        .build(&alice(), &ctx)
        .unwrap();
    assert_eq!(doc["_links"]["self"], json!({"href": "/users/42/"}));
}

#[test]
fn test_href_equals_adapter_output() {
    let urls = urls();
    let settings = Settings::default();
    let ctx = SerializerContext::new(&urls, &settings);

    let kwargs = HashMap::from([("pk".to_string(), "42".to_string())]);
    let expected = urls.reverse("api:user-detail", &kwargs).unwrap();

    let spec = link("user").with_pattern(pattern("api:user-detail").with_kwargs("pk"));
    let resolved = resolve_link(&spec, &alice(), &ctx).unwrap().unwrap();
    assert_eq!(resolved.href, expected);
}

#[test]
fn test_kwargs_shorthand_equivalence() {
    let urls = urls();
    let settings = Settings::default();
    let ctx = SerializerContext::new(&urls, &settings);

    let short = link("user").with_pattern(pattern("api:user-detail").with_kwargs("pk"));
    let long = link("user").with_pattern(pattern("api:user-detail").with_kwargs([("pk", "pk")]));
    assert_eq!(
        resolve_link(&short, &alice(), &ctx).unwrap(),
        resolve_link(&long, &alice(), &ctx).unwrap()
    );
}

#[test]
fn test_query_in_declared_order() {
    let urls = urls();
    let settings = Settings::default();
    let ctx = SerializerContext::new(&urls, &settings);

    let spec = link("search").with_pattern(
        pattern("api:search")
            .with_query("user", "username")
            .with_query("group", "group")
            .with_query("id", "pk"),
    );
    let resolved = resolve_link(&spec, &alice(), &ctx).unwrap().unwrap();
    assert_eq!(resolved.href, "/api/search/?user=alice&group=admins&id=42");
}

#[test]
fn test_name_and_profile_only_when_set() {
    let urls = urls();
    let settings = Settings::default();
    let ctx = SerializerContext::new(&urls, &settings);

    let spec = link("group")
        .with_name("primary")
        .with_profile("group")
        .with_pattern(pattern("api:group-detail").with_kwarg("slug", "group"));
    let resolved = resolve_link(&spec, &alice(), &ctx).unwrap().unwrap();
    assert_eq!(
        serde_json::to_value(resolved).unwrap(),
        json!({"href": "/api/groups/admins/", "name": "primary", "profile": "group"})
    );
}

#[test]
fn test_unresolvable_link_is_absent() {
    let urls = urls();
    let settings = Settings::default();
    let ctx = SerializerContext::new(&urls, &settings);

    let no_group = User {
        group: None,
        ..alice()
    };
    let spec = link("group").with_pattern(pattern("api:group-detail").with_kwarg("slug", "group"));
    assert_eq!(resolve_link(&spec, &no_group, &ctx).unwrap(), None);

    let doc = HalSerializer::new(RouteSpec::detail("user-detail"))
        .with_link(spec)
        .build(&no_group, &ctx)
        .unwrap();
    assert!(doc["_links"].get("group").is_none());
}

// ============================================================================
// 2. Validation before reversal
// ============================================================================

#[test]
fn test_both_or_neither_fails_before_reverser() {
    let settings = Settings::default();
    let calls = Cell::new(0);
    let counting = |name: &str, kwargs: &HashMap<String, String>| -> HalResult<String> {
        calls.set(calls.get() + 1);
        urls().reverse(name, kwargs)
    };
    let ctx = SerializerContext::new(&counting, &settings);

    let both = link("self")
        .with_href("/users/42/")
        .with_pattern(pattern("user-detail").with_kwargs("pk"));
    let neither = link("self");

    for spec in [both, neither] {
        let err = resolve_link(&spec, &alice(), &ctx).unwrap_err();
        assert!(matches!(err, HalError::ImproperlyConfigured(_)));
    }
    assert_eq!(calls.get(), 0);
}

#[test]
fn test_missing_attribute_surfaces() {
    let urls = urls();
    let settings = Settings::default();
    let ctx = SerializerContext::new(&urls, &settings);

    let serializer = HalSerializer::new(RouteSpec::detail("user-detail")).with_link(
        link("owner").with_pattern(pattern("api:user-detail").with_kwarg("pk", "owner_id")),
    );
    let err = serializer.build(&alice(), &ctx).unwrap_err();
    assert!(err.is_configuration());
    assert!(err.to_string().contains("owner_id"));
}

// ============================================================================
// 3. Single-or-array
// ============================================================================

#[test]
fn test_two_links_same_rel_become_array() {
    let urls = urls();
    let settings = Settings::default();
    let ctx = SerializerContext::new(&urls, &settings);

    let doc = HalSerializer::new(RouteSpec::detail("user-detail"))
        .with_links([
            link("item")
                .with_name("api")
                .with_pattern(pattern("api:user-detail").with_kwargs("pk")),
            link("item").with_name("emails").with_pattern(
                pattern("api:user-email-list").with_kwargs("pk"),
            ),
            link("up").with_pattern(pattern("api:user-list")),
        ])
        .build(&alice(), &ctx)
        .unwrap();

    assert_eq!(
        doc["_links"]["item"],
        json!([
            {"href": "/api/users/42/", "name": "api"},
            {"href": "/api/users/42/emails/", "name": "emails"}
        ])
    );
    assert_eq!(doc["_links"]["up"], json!({"href": "/api/users/"}));
}

// ============================================================================
// 4. Single resource documents
// ============================================================================

#[test]
fn test_self_link_failure_produces_no_document() {
    let urls = urls();
    let settings = Settings::default();
    let ctx = SerializerContext::new(&urls, &settings);

    let serializer = HalSerializer::new(RouteSpec::detail("api:group-detail"))
        .with_field(field("username"));
    let result = serializer.build(&alice(), &ctx);
    assert!(matches!(result, Err(HalError::NoReverseMatch(_))));
}

#[test]
fn test_fields_in_order_with_nulls() {
    let urls = urls();
    let settings = Settings::default();
    let ctx = SerializerContext::new(&urls, &settings);

    let no_group = User {
        group: None,
        ..alice()
    };
    let doc = HalSerializer::new(RouteSpec::detail("user-detail"))
        .with_fields([field("group"), field("username"), field("avatar")])
        .build(&no_group, &ctx)
        .unwrap();

    let keys: Vec<_> = doc.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["_links", "group", "username", "avatar"]);
    assert_eq!(doc["group"], Value::Null);
    assert_eq!(doc["avatar"], Value::Null);
    assert_eq!(doc["username"], json!("alice"));
}

// ============================================================================
// 5. Collections
// ============================================================================

#[test]
fn test_collection_preserves_order() {
    let urls = urls();
    let settings = Settings::default();
    let ctx = SerializerContext::new(&urls, &settings);
    let items = emails();
    let owner = alice();

    let doc = email_serializer()
        .many()
        .build_collection(&Collection::related(&owner, &items), &ctx)
        .unwrap();

    assert_eq!(
        Value::Object(doc),
        json!({
            "_links": {"self": {"href": "/api/users/42/emails/", "profile": "email"}},
            "_embedded": {"emails": [
                {"_links": {"self": {"href": "/api/users/42/emails/1/"}}, "address": "a@example.com"},
                {"_links": {"self": {"href": "/api/users/42/emails/2/"}}, "address": "b@example.com"},
                {"_links": {"self": {"href": "/api/users/42/emails/3/"}}, "address": "c@example.com"}
            ]}
        })
    );
}

#[test]
fn test_collection_kwargs_need_owner() {
    let urls = urls();
    let settings = Settings::default();
    let ctx = SerializerContext::new(&urls, &settings);
    let items = emails();

    let err = email_serializer()
        .build_collection(&Collection::new(&items), &ctx)
        .unwrap_err();
    assert!(matches!(err, HalError::ImproperlyConfigured(_)));
    let message = err.to_string();
    assert!(message.contains("related collection"));
    assert!(message.contains("filtered set"));
}

#[test]
fn test_collection_query_round_trip() {
    let urls = urls();
    let settings = Settings {
        absolute_urls: false,
        ..Settings::default()
    };
    let request = HttpRequest::builder().query_string("page=2").build();
    let ctx = SerializerContext::new(&urls, &settings).with_request(&request);
    let items = emails();
    let owner = alice();

    let doc = email_serializer()
        .build_collection(&Collection::related(&owner, &items), &ctx)
        .unwrap();
    let href = doc["_links"]["self"]["href"].as_str().unwrap();
    assert!(href.ends_with("?page=2"));
    assert_eq!(href, "/api/users/42/emails/?page=2");
}

#[test]
fn test_collection_self_link_failure_is_fatal() {
    let urls = urls();
    let settings = Settings::default();
    let ctx = SerializerContext::new(&urls, &settings);
    let items = emails();

    let serializer = HalSerializer::new(RouteSpec::detail("user-detail"))
        .with_list(ListMeta::new("api:missing-list"));
    assert!(matches!(
        serializer.build_collection(&Collection::new(&items), &ctx),
        Err(HalError::NoReverseMatch(_))
    ));
}

// ============================================================================
// 6. Absolute URLs and settings
// ============================================================================

#[test]
fn test_absolute_urls_with_request() {
    let urls = urls();
    let settings = Settings::default();
    let request = HttpRequest::builder()
        .scheme("https")
        .host("api.example.com")
        .query_string("page=3")
        .build();
    let ctx = SerializerContext::new(&urls, &settings).with_request(&request);
    let items = emails();
    let owner = alice();

    let doc = email_serializer()
        .build_collection(&Collection::related(&owner, &items), &ctx)
        .unwrap();
    assert_eq!(
        doc["_links"]["self"]["href"],
        json!("https://api.example.com/api/users/42/emails/?page=3")
    );
    assert_eq!(
        doc["_embedded"]["emails"][0]["_links"]["self"]["href"],
        json!("https://api.example.com/api/users/42/emails/1/")
    );
}

#[test]
fn test_settings_from_toml_drive_documents() {
    let urls = urls();
    let settings = settings_loader::from_toml_str(
        r#"
        absolute_urls = false
        pass_through_query = false
        default_resource_name = "results"
        "#,
    )
    .unwrap();
    let request = HttpRequest::builder()
        .host("api.example.com")
        .query_string("page=2")
        .build();
    let ctx = SerializerContext::new(&urls, &settings).with_request(&request);
    let users = [alice()];

    let doc = HalSerializer::new(RouteSpec::detail("api:user-detail"))
        .with_list(ListMeta::new("api:user-list"))
        .build_collection(&Collection::new(&users), &ctx)
        .unwrap();
    assert_eq!(doc["_links"]["self"]["href"], json!("/api/users/"));
    assert_eq!(
        doc["_embedded"]["results"][0]["_links"]["self"]["href"],
        json!("/api/users/42/")
    );
}
