#![cfg_attr(not(feature = "std"), no_std)]

//! # Paipan Common (排盘公共工具库)
//!
//! ## 概述
//!
//! 本 crate 提供排盘相关的公共类型和统一接口，包括：
//! - 干支基础类型（天干、地支、五行、阴阳、干支组合）
//! - 生肖映射
//! - 历法适配接口（CalendarProvider）及其能力声明
//!
//! ## 特点
//!
//! - ✅ 纯 Rust crate，无链上存储
//! - ✅ 可被多个 pallet 共享
//! - ✅ no_std 兼容
//!
//! 历法换算本身（公农历互转、节气推算）不在本 crate 实现，
//! 统一由 `CalendarProvider` 的实现方提供。

pub mod types;
pub mod traits;

// 重新导出公共类型
pub use types::{
    TianGan, DiZhi, WuXing, YinYang, GanZhi,
    Moment, SolarDate, LunarDate, CalendarInput, ResolvedBirth,
    CalendarError, CalendarCapabilities,
};

// 重新导出公共 Trait
pub use traits::CalendarProvider;
