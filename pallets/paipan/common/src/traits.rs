//! # 公共 Trait 定义
//!
//! 本模块定义排盘相关的公共接口，供多个 pallet 共享。

use crate::types::{
    CalendarCapabilities, CalendarError, CalendarInput, GanZhi, Moment, ResolvedBirth,
};

/// 历法适配接口
///
/// ## 说明
/// 提供公农历解析、年干支与节气时刻查询。历法换算（含闰月表、
/// 节气表）完全由实现方负责，排盘引擎只消费结果。
///
/// ## 使用者
/// - `pallet-bazi-paipan`: 四柱排盘、流年推算、太岁换年界判定
///
/// ## 实现者
/// - 运行时接入的历法数据源（链上黄历数据或预置历表）
/// - 测试环境中的固定历表 mock
pub trait CalendarProvider {
    /// 解析出生时间为四柱干支
    ///
    /// ## 参数
    /// - `input`: 公历或农历出生时间
    ///
    /// ## 返回
    /// - `Ok(ResolvedBirth)`: 四柱干支及双历日期
    /// - `Err(CalendarError::InvalidDate)`: 日期不存在
    /// - `Err(CalendarError::LeapMonthNotFound)`: 请求的闰月不存在
    fn resolve(input: &CalendarInput) -> Result<ResolvedBirth, CalendarError>;

    /// 查询某公历年的年干支（以该年 1 月 1 日所在农历年为准）
    ///
    /// ## 返回
    /// - `Some(GanZhi)`: 年干支
    /// - `None`: 年份超出历表范围
    fn year_ganzhi(year: u16) -> Option<GanZhi>;

    /// 查询某公历年立春的时刻（Unix 秒）
    ///
    /// 仅当 `capabilities().solar_terms` 为 true 时可用；
    /// 能力未声明时实现应返回 None。
    fn start_of_spring(year: u16) -> Option<Moment>;

    /// 时间戳所在的公历年份
    fn year_of(now: Moment) -> u16;

    /// 适配器能力声明，接入时一次性校验
    fn capabilities() -> CalendarCapabilities;
}
