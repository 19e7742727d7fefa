use super::*;
use crate::compose::{AnswerPayload, InstallTargets, compose};
use crate::model::ResolvedIdentifier;

fn summary(object_type: Option<&str>, source: Option<&str>) -> ResourceSummary {
    ResourceSummary {
        moid: Moid::new("m"),
        name: Some("n".to_string()),
        object_type: object_type.map(str::to_string),
        source_object_type: source.map(str::to_string),
    }
}

#[test]
fn server_native_type_prefers_source_object_type() {
    let s = summary(Some("compute.PhysicalSummary"), Some("compute.RackUnit"));
    assert_eq!(s.native_type(ResourceKind::Server), "compute.RackUnit");
}

#[test]
fn native_type_falls_back_to_kind_default() {
    let s = summary(None, None);
    assert_eq!(
        s.native_type(ResourceKind::OperatingSystemImage),
        "softwarerepository.OperatingSystemFile"
    );
    let s = summary(Some(""), None);
    assert_eq!(s.native_type(ResourceKind::Organization), "organization.Organization");
}

#[test]
fn list_response_tolerates_null_results() {
    let list: ListResponse = serde_json::from_str(r#"{"ObjectType":"x.List","Results":null}"#).unwrap();
    assert!(list.results.unwrap_or_default().is_empty());

    let list: ListResponse = serde_json::from_str(
        r#"{"Results":[{"Moid":"a","Name":"x","ObjectType":"organization.Organization"}]}"#,
    )
    .unwrap();
    assert_eq!(list.results.unwrap()[0].moid, Moid::new("a"));
}

#[test]
fn bulk_body_wraps_operations_as_rest_sub_requests() {
    let id = |kind: ResourceKind, moid: &str| ResolvedIdentifier::new(kind, Moid::new(moid), kind.object_type());
    let targets = InstallTargets {
        server: id(ResourceKind::Server, "s"),
        organization: id(ResourceKind::Organization, "o"),
        os_image: id(ResourceKind::OperatingSystemImage, "i"),
        scu_image: id(ResourceKind::ConfigUtilityImage, "u"),
    };
    let request = compose(&targets, AnswerPayload("x".to_string()));
    let v = serde_json::to_value(BulkRequestBody::from(&request)).unwrap();

    assert_eq!(v["Verb"], "POST");
    assert_eq!(v["Uri"], "/v1/os/Installs");
    let subs = v["Requests"].as_array().unwrap();
    assert_eq!(subs.len(), 1);
    assert_eq!(subs[0]["ObjectType"], "bulk.RestSubRequest");
    assert_eq!(subs[0]["Body"]["Image"]["Moid"], "i");
}

#[test]
fn bulk_response_reports_failed_sub_requests() {
    let resp: BulkResponse = serde_json::from_str(
        r#"{"Moid":"b1","Results":[{"Status":200,"Body":{}},{"Status":400,"Body":{"message":"bad"}}]}"#,
    )
    .unwrap();
    assert_eq!(resp.moid, Some(Moid::new("b1")));
    let failed: Vec<_> = resp.failed_results().collect();
    assert_eq!(failed.len(), 1);
    assert_eq!(failed[0].status, 400);
}
