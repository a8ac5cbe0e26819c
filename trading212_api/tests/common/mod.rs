#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures_util::future::BoxFuture;
use trading212_api::{Client, ClientConfig, Environment, Sleeper};
use wiremock::MockServer;

pub const API_KEY: &str = "key-123";
pub const API_SECRET: &str = "secret-456";

/// Returns immediately and remembers every requested duration.
#[derive(Default)]
pub struct RecordingSleeper {
    slept: Mutex<Vec<Duration>>,
}

impl RecordingSleeper {
    pub fn slept(&self) -> Vec<Duration> {
        self.slept.lock().unwrap().clone()
    }
}

impl Sleeper for RecordingSleeper {
    fn sleep(&self, duration: Duration) -> BoxFuture<'static, ()> {
        self.slept.lock().unwrap().push(duration);
        Box::pin(async {})
    }
}

pub fn config(server: &MockServer) -> ClientConfig {
    ClientConfig::new(Environment::Demo, API_KEY, API_SECRET).with_base_url(&server.uri())
}

pub fn client_with(config: ClientConfig) -> (Client, Arc<RecordingSleeper>) {
    let sleeper = Arc::new(RecordingSleeper::default());
    let client = Client::with_sleeper(config, sleeper.clone()).unwrap();
    (client, sleeper)
}

pub fn client(server: &MockServer) -> (Client, Arc<RecordingSleeper>) {
    client_with(config(server))
}

pub fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap()
}
