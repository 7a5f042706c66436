// SPDX-License-Identifier: MIT
//! Domain model for address book entries

pub mod compare;
pub mod entry;
pub mod enums;

pub use compare::{compare_by_id, compare_by_last_name};
pub use entry::{Address, Entry, Person};
pub use enums::{Gender, MaritalStatus};
