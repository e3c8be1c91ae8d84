//! Demonstrates signing a page URL with the default reqwest transport and an in-memory store,
//! then signing again from the cached ticket without touching the platform.

// std
use std::sync::Arc;
// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
use url::Url;
// self
use wechat_jssdk::{
	config::JssdkConfig,
	credential::CredentialKind,
	jssdk::ReqwestJssdk,
	store::{CredentialStore, MemoryStore},
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let token_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/cgi-bin/token").query_param("grant_type", "client_credential");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"access_token\":\"demo-access\",\"expires_in\":7200}");
		})
		.await;
	let ticket_mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/cgi-bin/ticket/getticket")
				.query_param("type", "jsapi")
				.query_param("access_token", "demo-access");
			then.status(200).header("content-type", "application/json").body(
				"{\"errcode\":0,\"errmsg\":\"ok\",\"ticket\":\"demo-ticket\",\"expires_in\":7200}",
			);
		})
		.await;
	let config = JssdkConfig::builder("wx-demo-app", "demo-secret")
		.token_endpoint(Url::parse(&server.url("/cgi-bin/token"))?)
		.ticket_endpoint(Url::parse(&server.url("/cgi-bin/ticket/getticket"))?)
		.build()?;
	let memory = MemoryStore::default();
	let store: Arc<dyn CredentialStore> = Arc::new(memory.clone());
	let jssdk = ReqwestJssdk::from_config(config, Some(store));
	let first = jssdk.sign_package("https://shop.example.com/item?id=42").await?;
	let second = jssdk.sign_package("https://shop.example.com/cart").await?;

	println!("First package: {first}.");
	println!("Second package: {second}.");

	if let Some(blob) = memory.get(CredentialKind::Ticket) {
		println!("Persisted ticket record: {}.", String::from_utf8_lossy(&blob));
	}

	token_mock.assert_async().await;
	ticket_mock.assert_async().await;

	Ok(())
}
