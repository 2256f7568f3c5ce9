//! # Todo API ライブラリ
//!
//! ルーター構築・ハンドラ・設定を公開する。
//! `main.rs` はインフラ初期化とサーバー起動に集中し、
//! HTTP レベルのテストはこのライブラリのルーターに対して行う。

pub mod app;
pub mod config;
pub mod error;
pub mod handler;
