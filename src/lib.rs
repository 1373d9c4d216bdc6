// SPDX-License-Identifier: Apache-2.0

pub mod command;
pub mod dispatch;
pub mod error;
pub mod git;
pub mod printer;
pub mod table;
pub mod types;
