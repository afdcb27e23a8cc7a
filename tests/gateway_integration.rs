// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Integration tests for the gateway adapter using wiremock.

use std::time::Duration;

use hue_panel::command::{Action, GroupDraft};
use hue_panel::protocol::{GatewayClient, GatewayConfig};
use hue_panel::target::Target;
use hue_panel::types::{BrightnessPercent, Fraction, GroupId, LightId, RgbColor};
use hue_panel::Error;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const KEY: &str = "testkey";

fn client(server: &MockServer) -> GatewayClient {
    GatewayConfig::new(server.uri().replace("http://", ""), KEY)
        .into_client()
        .unwrap()
}

fn ok_write() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!([{ "success": { "/ok": true } }]))
}

// ============================================================================
// Reads
// ============================================================================

mod reads {
    use super::*;

    #[tokio::test]
    async fn get_lights() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/testkey/lights"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "2": {
                    "name": "Hall",
                    "type": "Dimmable light",
                    "state": { "on": false, "bri": 1, "reachable": false }
                },
                "1": {
                    "name": "Desk",
                    "type": "Extended color light",
                    "modelid": "LCT015",
                    "state": { "on": true, "bri": 254, "hue": 5483, "sat": 254, "reachable": true },
                    "capabilities": { "control": { "colorgamuttype": "C", "mindimlevel": 1000 } }
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let lights = client(&server).get_lights().await.unwrap();

        let ids: Vec<&str> = lights.keys().map(LightId::as_str).collect();
        assert_eq!(ids, vec!["1", "2"]);

        let desk = &lights[&LightId::new("1")];
        assert_eq!(desk.name, "Desk");
        assert_eq!(desk.model_id.as_deref(), Some("LCT015"));
        assert_eq!(desk.state.color().unwrap().to_rgb().to_hex(), "#ff8000");

        let hall = &lights[&LightId::new("2")];
        assert!(!hall.is_lit());
    }

    #[tokio::test]
    async fn get_groups_and_all_lights() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/testkey/groups"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "1": {
                    "name": "Kitchen",
                    "lights": ["1", "2"],
                    "type": "LightGroup",
                    "action": { "on": true, "bri": 127 },
                    "state": { "all_on": false, "any_on": true }
                }
            })))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/api/testkey/groups/0"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "name": "Group 0",
                "lights": ["1", "2", "3"],
                "type": "LightGroup",
                "action": { "on": false }
            })))
            .mount(&server)
            .await;

        let client = client(&server);
        let groups = client.get_groups().await.unwrap();
        let kitchen = &groups[&GroupId::new("1")];
        assert_eq!(kitchen.name, "Kitchen");
        assert!(kitchen.contains(&LightId::new("2")));

        let all = client.get_group(&GroupId::all_lights()).await.unwrap();
        assert_eq!(all.lights.len(), 3);
        assert!(!all.action.unwrap().on);
    }

    #[tokio::test]
    async fn get_config() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/testkey/config"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "name": "Philips hue",
                "modelid": "BSB002",
                "bridgeid": "001788FFFE000000",
                "apiversion": "1.50.0",
                "swversion": "1950207110",
                "factorynew": false
            })))
            .mount(&server)
            .await;

        let config = client(&server).get_config().await.unwrap();
        assert_eq!(config.name.as_deref(), Some("Philips hue"));
        assert_eq!(config.api_version.as_deref(), Some("1.50.0"));
        assert_eq!(config.factory_new, Some(false));
    }

    #[tokio::test]
    async fn unauthorized_read_is_gateway_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/testkey/lights"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "error": { "type": 1, "address": "/lights", "description": "unauthorized user" } }
            ])))
            .mount(&server)
            .await;

        let err = client(&server).get_lights().await.unwrap_err();
        match err {
            Error::Gateway(err) => assert_eq!(err.message(), "unauthorized user"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn non_2xx_keeps_status() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/testkey/lights"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = client(&server).get_lights().await.unwrap_err();
        match err {
            Error::Gateway(err) => {
                assert_eq!(err.status(), Some(503));
                assert!(err.message().contains("503"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_body_is_parse_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/testkey/lights"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = client(&server).get_lights().await.unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[tokio::test]
    async fn timeout_is_gateway_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/testkey/lights"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({}))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let client = GatewayConfig::new(server.uri().replace("http://", ""), KEY)
            .with_timeout(Duration::from_millis(50))
            .into_client()
            .unwrap();

        let err = client.get_lights().await.unwrap_err();
        assert!(matches!(err, Error::Gateway(_)));
    }
}

// ============================================================================
// State writes
// ============================================================================

mod writes {
    use super::*;

    #[tokio::test]
    async fn light_toggle() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/api/testkey/lights/3/state"))
            .and(body_json(json!({ "on": false })))
            .respond_with(ok_write())
            .expect(1)
            .mount(&server)
            .await;

        client(&server)
            .set_light_state(&LightId::new("3"), &Action::toggle(false))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn light_brightness_turns_on() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/api/testkey/lights/1/state"))
            .and(body_json(json!({ "on": true, "bri": 127 })))
            .respond_with(ok_write())
            .expect(1)
            .mount(&server)
            .await;

        let action = Action::brightness_percent(BrightnessPercent::new(50).unwrap());
        client(&server)
            .apply(&Target::Light(LightId::new("1")), &action)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn zero_brightness_is_floored() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/api/testkey/groups/0/action"))
            .and(body_json(json!({ "on": true, "bri": 1 })))
            .respond_with(ok_write())
            .expect(1)
            .mount(&server)
            .await;

        client(&server)
            .apply(&Target::All, &Action::Brightness(Fraction::ZERO))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn group_color() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/api/testkey/groups/4/action"))
            .and(body_json(json!({ "on": true, "hue": 5483, "sat": 254 })))
            .respond_with(ok_write())
            .expect(1)
            .mount(&server)
            .await;

        let action = Action::color(RgbColor::from_hex("#FF8000").unwrap());
        client(&server)
            .set_group_action(&GroupId::new("4"), &action)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn group_zero_is_all_lights() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/api/testkey/groups/0/action"))
            .and(body_json(json!({ "on": true })))
            .respond_with(ok_write())
            .expect(1)
            .mount(&server)
            .await;

        client(&server)
            .set_group_action(&GroupId::all_lights(), &Action::toggle(true))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn rejected_write_is_gateway_error() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/api/testkey/lights/1/state"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "error": {
                    "type": 201,
                    "address": "/lights/1/state/bri",
                    "description": "parameter, bri, is not modifiable. Device is set to off."
                } }
            ])))
            .mount(&server)
            .await;

        let err = client(&server)
            .set_light_state(&LightId::new("1"), &Action::Brightness(Fraction::ONE))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("not modifiable"));
    }
}

// ============================================================================
// Group management
// ============================================================================

mod groups {
    use super::*;

    #[tokio::test]
    async fn create_group() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/testkey/groups"))
            .and(body_json(json!({
                "name": "Desk",
                "lights": ["1", "2"],
                "type": "LightGroup"
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([{ "success": { "id": "7" } }])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let draft = GroupDraft::new("Desk", [LightId::new("1"), LightId::new("2")]).unwrap();
        let id = client(&server).create_group(&draft).await.unwrap();
        assert_eq!(id, GroupId::new("7"));
    }

    #[tokio::test]
    async fn update_group() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/api/testkey/groups/7"))
            .and(body_json(json!({ "name": "Office", "lights": ["3"] })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "success": { "/groups/7/name": "Office" } },
                { "success": { "/groups/7/lights": ["3"] } }
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let draft = GroupDraft::new("Office", [LightId::new("3")]).unwrap();
        client(&server)
            .update_group(&GroupId::new("7"), &draft)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn delete_group() {
        let server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/api/testkey/groups/7"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([{ "success": "/groups/7 deleted" }])),
            )
            .expect(1)
            .mount(&server)
            .await;

        client(&server)
            .delete_group(&GroupId::new("7"))
            .await
            .unwrap();
    }
}
