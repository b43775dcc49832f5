//! Diesel table definitions for the PostgreSQL schema.
//!
//! The primary and fallback note tables are deliberately identical: the
//! outage flag only switches which one serves reads, so both must be able to
//! hold a full copy of every note written via the dual-write path.

diesel::table! {
    /// Primary note collection: the read target while the outage flag is clear.
    notes_primary (id) {
        /// Creation-timestamp-derived identifier (milliseconds).
        id -> Int8,
        /// Note body.
        content -> Text,
        /// Identifier of the owning account.
        author_id -> Int8,
        /// Login name of the owning account at creation time.
        author_username -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Fallback note collection: the read target while the outage flag is set.
    notes_fallback (id) {
        /// Creation-timestamp-derived identifier (milliseconds).
        id -> Int8,
        /// Note body.
        content -> Text,
        /// Identifier of the owning account.
        author_id -> Int8,
        /// Login name of the owning account at creation time.
        author_username -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Append-only audit log.
    audit_events (id) {
        /// Surrogate key (bigserial); events are ordered by `recorded_at`.
        id -> Int8,
        /// Moment the action happened.
        recorded_at -> Timestamptz,
        /// Username the action is attributed to.
        username -> Varchar,
        /// Actor role wire name (`user`, `admin`, `unknown`).
        role -> Varchar,
        /// Action wire name (`LOGIN_SUCCESS`, ...).
        action -> Varchar,
    }
}
