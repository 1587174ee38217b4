use anyhow::Result;
use httpmock::prelude::*;
use httpmock::Method::PATCH;
use registrar_adapter::{
    ContactDetails, ContactLookup, HolderHandle, Registrar, RegistrarAdapter, Role, Whois,
};
use serde_json::json;

const TOKEN: &str = "test-token";
const HANDLE_KEY: &str = "hosting-panel";

fn adapter_for(server: &MockServer) -> RegistrarAdapter {
    RegistrarAdapter::with_base_url(&server.base_url(), TOKEN)
        .unwrap()
        .with_handle_key(HANDLE_KEY)
}

fn owner_details() -> ContactDetails {
    ContactDetails {
        company_name: String::new(),
        initials: "P.".to_string(),
        surname: "de Vries".to_string(),
        address: "Kerkstraat 5".to_string(),
        zip_code: "3511AB".to_string(),
        city: "Utrecht".to_string(),
        country: "NL".to_string(),
        phone_number: "+31.301234567".to_string(),
        email_address: "p@devries.nl".to_string(),
    }
}

fn holder_json(id: u64, email: &str, country_id: u64) -> serde_json::Value {
    json!({
        "holder_id": id,
        "company": null,
        "firstname": "P.",
        "lastname": "de Vries",
        "street": "Kerkstraat 5",
        "zipcode": "3511AB",
        "city": "Utrecht",
        "country_id": country_id,
        "phone_number": "+31.301234567",
        "email": email
    })
}

fn mock_countries(server: &MockServer) -> httpmock::Mock<'_> {
    server.mock(|when, then| {
        when.method(GET).path("/countries").query_param("token", TOKEN);
        then.status(200).json_body(json!({"results": [
            {"id": 150, "code": "NL"},
            {"id": 21, "code": "BE"},
            {"id": 151, "code": "NL"}
        ]}));
    })
}

fn mock_extensions(server: &MockServer) -> httpmock::Mock<'_> {
    server.mock(|when, then| {
        when.method(GET).path("/extensions").query_param("token", TOKEN);
        then.status(200).json_body(json!({"results": [
            {"id": 7, "extension": "nl"},
            {"id": 12, "extension": "co.uk"}
        ]}));
    })
}

#[tokio::test]
async fn test_register_without_owner_contact_fails() -> Result<()> {
    let server = MockServer::start();
    let orders = server.mock(|when, then| {
        when.method(POST).path("/orders/add");
        then.status(200);
    });

    let mut adapter = adapter_for(&server);
    let whois = Whois::default();

    let reply = adapter.register("example.com", &whois).await;

    assert!(!reply.value);
    assert!(reply
        .errors
        .contains(&"No owner contact given for domain example.com".to_string()));
    assert!(reply.handles.is_empty());
    orders.assert_hits(0);
    Ok(())
}

#[tokio::test]
async fn test_register_resolves_existing_holder_by_email() -> Result<()> {
    let server = MockServer::start();

    let holders = server.mock(|when, then| {
        when.method(GET).path("/holders").query_param("token", TOKEN);
        then.status(200).json_body(json!({"results": [
            holder_json(80, "someone@else.nl", 150),
            holder_json(81, "p@devries.nl", 150)
        ]}));
    });
    let countries = mock_countries(&server);
    let extensions = mock_extensions(&server);
    let orders = server.mock(|when, then| {
        when.method(POST)
            .path("/orders/add")
            .x_www_form_urlencoded_tuple("domain", "example")
            .x_www_form_urlencoded_tuple("extension_id", "7")
            .x_www_form_urlencoded_tuple("holder_id", "81")
            .x_www_form_urlencoded_tuple("year", "1")
            .x_www_form_urlencoded_tuple("token", TOKEN);
        then.status(200).json_body(json!({"results": {}}));
    });

    let mut adapter = adapter_for(&server);
    adapter.period = 3;
    let whois = Whois::with_owner(owner_details());

    let reply = adapter.register("example.nl", &whois).await;

    holders.assert();
    countries.assert();
    extensions.assert();
    orders.assert();
    assert!(reply.value);
    assert!(reply.is_ok());
    assert_eq!(adapter.period, 1);
    assert_eq!(reply.handles.get(&Role::Owner), Some(&HolderHandle::from(81)));
    Ok(())
}

#[tokio::test]
async fn test_register_prefers_cached_handle() -> Result<()> {
    let server = MockServer::start();

    let holders = server.mock(|when, then| {
        when.method(GET).path("/holders");
        then.status(200).json_body(json!({"results": []}));
    });
    let extensions = mock_extensions(&server);
    let orders = server.mock(|when, then| {
        when.method(POST)
            .path("/orders/add")
            .x_www_form_urlencoded_tuple("holder_id", "4711");
        then.status(200);
    });

    let mut adapter = adapter_for(&server);
    let mut whois = Whois::with_owner(owner_details());
    whois
        .owner
        .registrar_handles
        .insert(HANDLE_KEY.to_string(), HolderHandle::new("4711"));

    let reply = adapter.register("example.nl", &whois).await;

    assert!(reply.value);
    assert!(reply.handles.is_empty());
    holders.assert_hits(0);
    extensions.assert();
    orders.assert();
    Ok(())
}

#[tokio::test]
async fn test_register_creates_holder_when_email_unknown() -> Result<()> {
    let server = MockServer::start();

    let holders = server.mock(|when, then| {
        when.method(GET).path("/holders");
        then.status(200)
            .json_body(json!({"results": [holder_json(80, "someone@else.nl", 150)]}));
    });
    let countries = mock_countries(&server);
    let extensions = mock_extensions(&server);
    let create = server.mock(|when, then| {
        when.method(POST)
            .path("/holder/add")
            .x_www_form_urlencoded_tuple("firstname", "P.")
            .x_www_form_urlencoded_tuple("lastname", "de Vries")
            .x_www_form_urlencoded_tuple("country_id", "150")
            .x_www_form_urlencoded_tuple("email", "p@devries.nl")
            .x_www_form_urlencoded_tuple("module", "1")
            .x_www_form_urlencoded_tuple("token", TOKEN);
        then.status(200).json_body(json!({"results": {"holder_id": 99}}));
    });
    let orders = server.mock(|when, then| {
        when.method(POST)
            .path("/orders/add")
            .x_www_form_urlencoded_tuple("holder_id", "99");
        then.status(200);
    });

    let mut adapter = adapter_for(&server);
    let reply = adapter
        .register("example.nl", &Whois::with_owner(owner_details()))
        .await;

    holders.assert();
    countries.assert_hits(2);
    extensions.assert();
    create.assert();
    orders.assert();
    assert!(reply.value);
    assert_eq!(reply.handles.get(&Role::Owner), Some(&HolderHandle::from(99)));
    Ok(())
}

#[tokio::test]
async fn test_transfer_sends_auth_code_and_multi_label_suffix() -> Result<()> {
    let server = MockServer::start();
    let extensions = mock_extensions(&server);
    let orders = server.mock(|when, then| {
        when.method(POST)
            .path("/orders/add")
            .x_www_form_urlencoded_tuple("domain", "example")
            .x_www_form_urlencoded_tuple("extension_id", "12")
            .x_www_form_urlencoded_tuple("authcode", "EPP-1234");
        then.status(200);
    });

    let mut adapter = adapter_for(&server);
    let mut whois = Whois::with_owner(owner_details());
    whois
        .owner
        .registrar_handles
        .insert(HANDLE_KEY.to_string(), HolderHandle::from(81));

    let reply = adapter.transfer("example.co.uk", &whois, "EPP-1234").await;

    extensions.assert();
    orders.assert();
    assert!(reply.value);
    assert_eq!(reply.successes.len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_transfer_with_unknown_extension_places_no_order() -> Result<()> {
    let server = MockServer::start();
    let extensions = mock_extensions(&server);
    let orders = server.mock(|when, then| {
        when.method(POST).path("/orders/add");
        then.status(200);
    });

    let mut adapter = adapter_for(&server);
    adapter.period = 2;
    let mut whois = Whois::with_owner(owner_details());
    whois
        .owner
        .registrar_handles
        .insert(HANDLE_KEY.to_string(), HolderHandle::from(81));

    let reply = adapter.transfer("example.museum", &whois, "code").await;

    extensions.assert();
    orders.assert_hits(0);
    assert!(!reply.value);
    assert_eq!(adapter.period, 2);
    assert_eq!(
        reply.errors,
        vec!["The domain example.museum could not be transferred".to_string()]
    );
    Ok(())
}

#[tokio::test]
async fn test_create_contact_requires_known_country() -> Result<()> {
    let server = MockServer::start();
    let countries = mock_countries(&server);
    let create = server.mock(|when, then| {
        when.method(POST).path("/holder/add");
        then.status(200).json_body(json!({"results": {"holder_id": 1}}));
    });

    let mut details = owner_details();
    details.country = "XX".to_string();

    let reply = adapter_for(&server)
        .create_contact(&Whois::with_owner(details), Role::Owner)
        .await;

    countries.assert();
    create.assert_hits(0);
    assert!(reply.value.is_none());
    assert_eq!(reply.errors, vec!["Country code XX could not be resolved".to_string()]);
    Ok(())
}

#[tokio::test]
async fn test_created_contact_reads_back_unchanged() -> Result<()> {
    let server = MockServer::start();
    let countries = mock_countries(&server);
    let create = server.mock(|when, then| {
        when.method(POST)
            .path("/holder/add")
            .x_www_form_urlencoded_tuple("street", "Kerkstraat 5")
            .x_www_form_urlencoded_tuple("zipcode", "3511AB")
            .x_www_form_urlencoded_tuple("city", "Utrecht")
            .x_www_form_urlencoded_tuple("phone_number", "+31.301234567");
        then.status(200).json_body(json!({"results": {"holder_id": 81}}));
    });
    let holders = server.mock(|when, then| {
        when.method(GET).path("/holders");
        then.status(200)
            .json_body(json!({"results": [holder_json(81, "p@devries.nl", 150)]}));
    });

    let adapter = adapter_for(&server);
    let mut whois = Whois::default();
    whois.tech.details = owner_details();

    let created = adapter.create_contact(&whois, Role::Tech).await;
    let handle = created.value.expect("holder handle");
    assert_eq!(handle, HolderHandle::from(81));

    let fetched = adapter.contact(&handle).await;

    create.assert();
    holders.assert();
    countries.assert_hits(2);
    assert!(fetched.is_ok());
    assert_eq!(fetched.value, ContactLookup::Found(owner_details()));
    Ok(())
}

#[tokio::test]
async fn test_update_contact_sends_company_and_edits_by_handle() -> Result<()> {
    let server = MockServer::start();
    let countries = mock_countries(&server);
    let edit = server.mock(|when, then| {
        when.method(PATCH)
            .path("/holder/edit/81")
            .x_www_form_urlencoded_tuple("company", "De Vries BV")
            .x_www_form_urlencoded_tuple("country_id", "21")
            .x_www_form_urlencoded_tuple("token", TOKEN);
        then.status(200).json_body(json!({"results": {}}));
    });

    let mut details = owner_details();
    details.company_name = "De Vries BV".to_string();
    details.country = "be".to_string();
    let mut whois = Whois::default();
    whois.admin.details = details;

    let reply = adapter_for(&server)
        .update_contact(&HolderHandle::from(81), &whois, Role::Admin)
        .await;

    countries.assert();
    edit.assert();
    assert!(reply.value);
    assert!(reply.is_ok());
    Ok(())
}

#[tokio::test]
async fn test_update_contact_failure_is_reported() -> Result<()> {
    let server = MockServer::start();
    let _countries = mock_countries(&server);
    let edit = server.mock(|when, then| {
        when.method(PATCH).path("/holder/edit/81");
        then.status(422).json_body(json!({"message": "invalid"}));
    });

    let reply = adapter_for(&server)
        .update_contact(&HolderHandle::from(81), &Whois::with_owner(owner_details()), Role::Owner)
        .await;

    edit.assert();
    assert!(!reply.value);
    assert_eq!(reply.errors, vec!["Could not update contact".to_string()]);
    Ok(())
}

#[tokio::test]
async fn test_contact_lookup_distinguishes_missing_from_failed() -> Result<()> {
    let server = MockServer::start();
    let _countries = mock_countries(&server);
    let holders = server.mock(|when, then| {
        when.method(GET).path("/holders");
        then.status(200)
            .json_body(json!({"results": [holder_json(81, "p@devries.nl", 150)]}));
    });

    let reply = adapter_for(&server).contact(&HolderHandle::from(5)).await;
    holders.assert();
    assert_eq!(reply.value, ContactLookup::NotFound);
    assert_eq!(reply.errors, vec!["Contact could not be retrieved".to_string()]);
    assert_eq!(reply.value.into_details(), ContactDetails::default());

    let failing = MockServer::start();
    let down = failing.mock(|when, then| {
        when.method(GET).path("/holders");
        then.status(500);
    });

    let reply = adapter_for(&failing).contact(&HolderHandle::from(81)).await;
    down.assert();
    assert_eq!(reply.value, ContactLookup::FetchFailed);
    assert_eq!(reply.errors.len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_contact_with_unresolved_country_is_not_returned() -> Result<()> {
    let server = MockServer::start();
    let countries = mock_countries(&server);
    let _holders = server.mock(|when, then| {
        when.method(GET).path("/holders");
        then.status(200)
            .json_body(json!({"results": [holder_json(81, "p@devries.nl", 404)]}));
    });

    let reply = adapter_for(&server).contact(&HolderHandle::from(81)).await;

    countries.assert();
    assert_eq!(reply.value, ContactLookup::NotFound);
    assert_eq!(reply.errors, vec!["Contact could not be retrieved".to_string()]);
    assert!(!reply.is_ok());
    Ok(())
}

#[tokio::test]
async fn test_contact_fails_when_country_list_is_unavailable() -> Result<()> {
    let server = MockServer::start();
    let countries = server.mock(|when, then| {
        when.method(GET).path("/countries");
        then.status(500);
    });
    let _holders = server.mock(|when, then| {
        when.method(GET).path("/holders");
        then.status(200)
            .json_body(json!({"results": [holder_json(81, "p@devries.nl", 150)]}));
    });

    let reply = adapter_for(&server).contact(&HolderHandle::from(81)).await;

    countries.assert();
    assert_eq!(reply.value, ContactLookup::FetchFailed);
    assert_eq!(reply.errors, vec!["Contact could not be retrieved".to_string()]);
    assert_eq!(reply.value.found(), None);
    Ok(())
}

#[tokio::test]
async fn test_list_contacts_drops_unknown_countries() -> Result<()> {
    let server = MockServer::start();
    let countries = mock_countries(&server);
    let holders = server.mock(|when, then| {
        when.method(GET).path("/holders");
        then.status(200).json_body(json!({"results": [
            holder_json(1, "a@example.nl", 150),
            holder_json(2, "b@example.nl", 404),
            holder_json(3, "c@example.be", 21)
        ]}));
    });

    let reply = adapter_for(&server).list_contacts(None).await;

    countries.assert();
    holders.assert();
    let handles: Vec<&str> = reply.value.iter().map(|c| c.handle.as_str()).collect();
    assert_eq!(handles, vec!["1", "3"]);
    assert_eq!(reply.value[1].details.country, "BE");

    let rendered = serde_json::to_value(&reply.value)?;
    assert_eq!(rendered[0]["Handle"], "1");
    assert_eq!(rendered[0]["SurName"], "de Vries");
    assert_eq!(rendered[0]["EmailAddress"], "a@example.nl");
    Ok(())
}

#[tokio::test]
async fn test_email_filter_stops_at_first_match() -> Result<()> {
    let server = MockServer::start();
    let _countries = mock_countries(&server);
    let _holders = server.mock(|when, then| {
        when.method(GET).path("/holders");
        then.status(200).json_body(json!({"results": [
            holder_json(1, "a@example.nl", 150),
            holder_json(2, "shared@example.nl", 150),
            holder_json(3, "shared@example.nl", 150)
        ]}));
    });

    let adapter = adapter_for(&server);

    let reply = adapter.list_contacts(Some("shared@example.nl")).await;
    assert_eq!(reply.value.len(), 1);
    assert_eq!(reply.value[0].handle, HolderHandle::from(2));

    let mut whois = Whois::default();
    whois.admin.details.email_address = "a@example.nl".to_string();
    let found = adapter.find_contact_handle(&whois, Role::Admin).await;
    assert_eq!(found.value, Some(HolderHandle::from(1)));

    whois.admin.details.email_address = "nobody@example.nl".to_string();
    let missing = adapter.find_contact_handle(&whois, Role::Admin).await;
    assert_eq!(missing.value, None);
    Ok(())
}

#[tokio::test]
async fn test_email_filter_is_case_sensitive() -> Result<()> {
    let server = MockServer::start();
    let _countries = mock_countries(&server);
    let _holders = server.mock(|when, then| {
        when.method(GET).path("/holders");
        then.status(200).json_body(json!({"results": [
            holder_json(1, "P@DeVries.nl", 150),
            holder_json(2, "p@devries.nl", 150)
        ]}));
    });

    let adapter = adapter_for(&server);

    let reply = adapter.list_contacts(Some("p@devries.nl")).await;
    assert_eq!(reply.value.len(), 1);
    assert_eq!(reply.value[0].handle, HolderHandle::from(2));

    let mut whois = Whois::default();
    whois.owner.details.email_address = "P@DEVRIES.NL".to_string();
    let missing = adapter.find_contact_handle(&whois, Role::Owner).await;
    assert_eq!(missing.value, None);
    Ok(())
}
