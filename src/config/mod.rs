// ABOUTME: Configuration module for the ChronoFit session engine
// ABOUTME: Environment-driven settings for storage and sampling
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ChronoFit

//! Configuration management

pub mod environment;

pub use environment::ServerConfig;
