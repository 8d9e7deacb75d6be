// Copyright (C) 2026  winnyboy5
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.
//! Mock Pi-hole API.
//!
//! Serves `GET /admin/api.php` on an ephemeral local port with a response that
//! tests can swap at any time, and records every query string it receives.

use axum::{
    extract::{RawQuery, State},
    http::StatusCode,
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

#[derive(Debug, Clone)]
struct Reply {
    status: StatusCode,
    body: String,
}

#[derive(Debug, Default)]
struct MockState {
    reply: Mutex<Option<Reply>>,
    queries: Mutex<Vec<String>>,
}

/// Running mock Pi-hole; aborted on drop
pub struct MockPihole {
    addr: SocketAddr,
    state: Arc<MockState>,
    handle: JoinHandle<()>,
}

impl MockPihole {
    /// Start a mock answering 200 with `body`
    pub async fn start(body: impl Into<String>) -> Self {
        let state = Arc::new(MockState::default());
        *state.reply.lock().unwrap() = Some(Reply {
            status: StatusCode::OK,
            body: body.into(),
        });

        let app = Router::new()
            .route("/admin/api.php", get(api_handler))
            .with_state(Arc::clone(&state));

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock Pi-hole");
        let addr = listener.local_addr().expect("mock Pi-hole address");

        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self {
            addr,
            state,
            handle,
        }
    }

    /// `host:port` authority of the mock
    pub fn host(&self) -> String {
        self.addr.to_string()
    }

    /// Answer 200 with `body` from now on
    pub fn set_body(&self, body: impl Into<String>) {
        self.set_reply(200, body);
    }

    /// Answer with `status` and `body` from now on
    pub fn set_reply(&self, status: u16, body: impl Into<String>) {
        let status = StatusCode::from_u16(status).expect("valid status code");
        *self.state.reply.lock().unwrap() = Some(Reply {
            status,
            body: body.into(),
        });
    }

    /// Number of requests served so far
    pub fn request_count(&self) -> usize {
        self.state.queries.lock().unwrap().len()
    }

    /// Raw query string of the most recent request
    pub fn last_query(&self) -> Option<String> {
        self.state.queries.lock().unwrap().last().cloned()
    }
}

impl Drop for MockPihole {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn api_handler(
    State(state): State<Arc<MockState>>,
    RawQuery(query): RawQuery,
) -> (StatusCode, String) {
    state
        .queries
        .lock()
        .unwrap()
        .push(query.unwrap_or_default());

    match state.reply.lock().unwrap().clone() {
        Some(reply) => (reply.status, reply.body),
        None => (StatusCode::NOT_FOUND, String::new()),
    }
}
