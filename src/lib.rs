//! # SNO API
//!
//! Academic administration backend (users, courses, lectures) built with
//! Axum and PostgreSQL. Every request is gated by a stateless bearer-token
//! filter chain, and lecture listings can be filtered and sorted on criteria
//! chosen per request.
//!
//! ## Architecture
//!
//! ```text
//! crates/
//! ├── sno-core/        # AppError, pagination, password hashing
//! ├── sno-config/      # JWT, CORS, public paths, server settings
//! ├── sno-db/          # Postgres pool
//! ├── sno-auth/        # TokenService, Claims, Subject
//! └── sno-models/      # Lecture and User records, DTOs, typed ids
//! src/
//! ├── middleware/      # origin guard, CORS, authorization filter, entry point
//! ├── modules/         # feature modules (auth, lectures, health)
//! ├── repository/      # storage traits, Postgres and in-memory implementations
//! ├── router.rs        # middleware order and route table
//! └── state.rs         # AppState shared by every handler
//! ```
//!
//! Each feature module follows the same layout:
//!
//! - `controller.rs`: HTTP handlers with OpenAPI annotations
//! - `service.rs`: business logic over the repository traits
//! - `router.rs`: Axum routes
//!
//! ## Request flow
//!
//! ```text
//! request
//!   → logging + metrics
//!   → origin guard        (403 {"error":"Invalid CORS request"})
//!   → CORS headers        (preflight answered here)
//!   → authorization filter
//!       public path       → anonymous SecurityContext
//!       valid bearer      → authenticated SecurityContext
//!       otherwise         → entry point (401 {"error":"Unauthorized"})
//!   → handler
//! ```
//!
//! ## Filtered lecture listing
//!
//! `GET /api/lectures/filter?title=intro&lecturerId=3&startDate=2024-01-01&sortBy=date&sortDirection=desc`
//!
//! Criteria become a [`LectureSpecification`](modules::lectures::specification::LectureSpecification),
//! a conjunction of clauses that the Postgres repository folds into SQL and
//! the in-memory repository evaluates directly. A criterion that does not
//! parse is dropped; an unknown sort key falls back to title ascending.
//!
//! ## Testing
//!
//! Integration tests drive the full router with `tower::ServiceExt::oneshot`
//! against the in-memory repositories (`test-utils` feature), so no database
//! is needed:
//!
//! ```bash
//! cargo test
//! ```

pub mod docs;
pub mod logging;
pub mod metrics;
pub mod middleware;
pub mod modules;
pub mod repository;
pub mod router;
pub mod state;
pub mod validator;
