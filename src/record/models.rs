//! Record kinds returned by the API

use super::coerce;
use super::types::Identified;
use chrono::{DateTime, Utc};

define_record! {
    /// A user profile, with the user's latest status inline when the API sends it
    pub struct User as "user" {
        created_at: DateTime<Utc> => coerce::timestamp,
        description: String => coerce::html,
        favourites_count: i64 => coerce::integer,
        followers_count: i64 => coerce::integer,
        following: bool => coerce::flag,
        friends_count: i64 => coerce::integer,
        id: u64 => coerce::id,
        location: String => coerce::text,
        name: String => coerce::text,
        notifications: bool => coerce::flag,
        profile_background_color: String => coerce::text,
        profile_background_image_url: String => coerce::text,
        profile_background_tile: bool => coerce::flag,
        profile_image_url: String => coerce::text,
        profile_link_color: String => coerce::text,
        profile_sidebar_border_color: String => coerce::text,
        profile_sidebar_fill_color: String => coerce::text,
        profile_text_color: String => coerce::text,
        protected: bool => coerce::flag,
        screen_name: String => coerce::text,
        /// Most recent status
        status: Box<Status> => coerce::nested,
        statuses_count: i64 => coerce::integer,
        time_zone: String => coerce::text,
        url: String => coerce::text,
        /// Offset from UTC in seconds
        utc_offset: i64 => coerce::integer,
    }
}

define_record! {
    /// A status from a user timeline
    pub struct Status as "status" {
        id: u64 => coerce::id,
        text: String => coerce::html,
        created_at: DateTime<Utc> => coerce::timestamp,
        source: String => coerce::text,
        truncated: bool => coerce::flag,
        favorited: bool => coerce::flag,
        in_reply_to_status_id: u64 => coerce::id,
        in_reply_to_user_id: u64 => coerce::id,
        in_reply_to_screen_name: String => coerce::text,
        /// Author, present on timeline responses
        user: Box<User> => coerce::nested,
    }
}

define_record! {
    /// A status as returned by the Search API
    pub struct SearchResult as "search_result" {
        id: u64 => coerce::id,
        text: String => coerce::html,
        created_at: DateTime<Utc> => coerce::timestamp,
        from_user: String => coerce::text,
        from_user_id: u64 => coerce::id,
        to_user_id: u64 => coerce::id,
        iso_language_code: String => coerce::text,
        source: String => coerce::text,
        profile_image_url: String => coerce::text,
    }
}

define_record! {
    /// A trending topic
    pub struct Trend as "trend" {
        name: String => coerce::text,
        query: String => coerce::text,
        url: String => coerce::text,
    }
}

impl Identified for User {
    fn record_id(&self) -> Option<u64> {
        self.id
    }
}

impl Identified for Status {
    fn record_id(&self) -> Option<u64> {
        self.id
    }
}

impl Identified for SearchResult {
    fn record_id(&self) -> Option<u64> {
        self.id
    }
}
