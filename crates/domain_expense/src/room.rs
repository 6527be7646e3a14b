//! Rooms and their members

use serde::{Deserialize, Serialize};

use core_kernel::{Currency, MemberId, RoomId};

/// A group of members sharing expenses in one currency
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    pub name: String,
    pub currency: Currency,
}

impl Room {
    pub fn new(name: impl Into<String>, currency: Currency) -> Self {
        Self {
            id: RoomId::new_v7(),
            name: name.into(),
            currency,
        }
    }
}

/// A person belonging to a room
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub room_id: RoomId,
    pub full_name: String,
    pub nickname: Option<String>,
    /// Inactive members keep their history but drop out of balances
    pub is_active: bool,
}

impl Member {
    /// Creates an active member
    pub fn new(room_id: RoomId, full_name: impl Into<String>) -> Self {
        Self {
            id: MemberId::new_v7(),
            room_id,
            full_name: full_name.into(),
            nickname: None,
            is_active: true,
        }
    }

    /// Sets the nickname
    pub fn with_nickname(mut self, nickname: impl Into<String>) -> Self {
        self.nickname = Some(nickname.into());
        self
    }

    /// Marks the member inactive
    pub fn deactivated(mut self) -> Self {
        self.is_active = false;
        self
    }
}
