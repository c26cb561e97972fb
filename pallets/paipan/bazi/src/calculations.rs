//! # 排盘核心算法
//!
//! 命盘构建与各派生分析。所有函数均为命盘的纯函数：不读写存储、
//! 不持有共享状态，同一输入恒得同一输出。
//!
//! - 命盘构建：时辰窗口校验 + 藏干/纳音装柱
//! - 五行强度：基础分 → 月令季节增强 → 特殊格局加成，三遍推进
//! - 十神：干对干查表，支按藏干权重与补气规则给出列表
//! - 大运：以日柱干支为起点，按性别与日干阴阳定顺逆，十步十年
//! - 流年：自出生年起十年，逐年取年干支并配神煞

use frame_support::BoundedVec;
use sp_std::vec::Vec;

use pallet_paipan_common::{
    CalendarProvider, DiZhi, GanZhi, Moment, ResolvedBirth, TianGan, YinYang,
};

use crate::constants::{
    canggan_of, nayin_of, DOMINANCE_BONUS_TENTHS, DOMINANCE_THRESHOLD_PERCENT, HOUR_WINDOWS,
    SANHE_TRIADS, SEASON_TABLE, SHISHEN_TABLE,
};
use crate::types::{
    BirthTime, CangGanInfo, CangGanType, Chart, ChartError, DaYunStep, ElementScore, GanRelation,
    Gender, LiuNianStep, ShiShen, ShiShenRelations, SiZhu, SiZhuIndex, Zhu, ZhiShiShen,
};

/// 大运、流年步数类型别名
pub type ProjectionVec<T> =
    BoundedVec<T, frame_support::pallet_prelude::ConstU32<{ crate::types::PROJECTION_STEPS }>>;

// ============================================================================
// 命盘构建
// ============================================================================

/// 小时 → 时辰地支
///
/// 十二时辰把一天划分为十二个两小时窗口，子时跨午夜（23:00-01:00）。
pub fn hour_zhi(hour: u8) -> Option<DiZhi> {
    if hour > 23 {
        return None;
    }
    for (i, &(start, end)) in HOUR_WINDOWS.iter().enumerate() {
        let hit = if start > end {
            // 跨午夜窗口
            hour >= start || hour < end
        } else {
            hour >= start && hour < end
        };
        if hit {
            return DiZhi::from_index(i as u8);
        }
    }
    None
}

/// 日干对目标干的十神关系
pub fn gan_shishen(day: TianGan, other: TianGan) -> Result<ShiShen, ChartError> {
    let row = SHISHEN_TABLE
        .get(day.0 as usize)
        .ok_or(ChartError::UnknownBranchOrStem)?;
    let index = row
        .get(other.0 as usize)
        .ok_or(ChartError::UnknownBranchOrStem)?;
    ShiShen::from_index(*index).ok_or(ChartError::UnknownBranchOrStem)
}

/// 装柱：填充藏干（含十神标注）和纳音
pub fn build_zhu(ganzhi: GanZhi, rizhu: TianGan) -> Result<Zhu, ChartError> {
    let entries = canggan_of(ganzhi.zhi).ok_or(ChartError::UnknownBranchOrStem)?;

    let mut canggan = Vec::with_capacity(entries.len());
    for &(gan_index, weight) in entries.iter() {
        let gan = TianGan::from_index(gan_index).ok_or(ChartError::UnknownBranchOrStem)?;
        let shishen = gan_shishen(rizhu, gan)?;
        let canggan_type =
            CangGanType::from_weight(weight).ok_or(ChartError::UnknownBranchOrStem)?;
        canggan.push(CangGanInfo { gan, shishen, canggan_type, weight });
    }

    let nayin = nayin_of(ganzhi).ok_or(ChartError::UnknownBranchOrStem)?;

    Ok(Zhu { ganzhi, canggan: BoundedVec::truncate_from(canggan), nayin })
}

/// 从历法适配器的解析结果构建命盘
///
/// 先校验适配器给出的时支与时辰窗口表一致，不一致说明适配器
/// 与本表的时辰划分配置冲突，报 `HourBranchMismatch`。
pub fn build_chart(resolved: &ResolvedBirth, gender: Gender) -> Result<Chart, ChartError> {
    let hour = resolved.solar.hour;
    let expected = hour_zhi(hour).ok_or(ChartError::InvalidDate)?;
    let actual = resolved.pillars[3].zhi;
    if expected != actual {
        return Err(ChartError::HourBranchMismatch { hour, expected, actual });
    }

    let birth_time = BirthTime {
        year: resolved.solar.year,
        month: resolved.solar.month,
        day: resolved.solar.day,
        hour: resolved.solar.hour,
        minute: resolved.solar.minute,
    };

    build_chart_from_pillars(&resolved.pillars, gender, birth_time)
}

/// 从四柱干支直接装盘（存储重建路径，不再重复时辰校验）
pub fn build_chart_from_pillars(
    pillars: &[GanZhi; 4],
    gender: Gender,
    birth_time: BirthTime,
) -> Result<Chart, ChartError> {
    let rizhu = pillars[2].gan;
    let sizhu = SiZhu {
        year_zhu: build_zhu(pillars[0], rizhu)?,
        month_zhu: build_zhu(pillars[1], rizhu)?,
        day_zhu: build_zhu(pillars[2], rizhu)?,
        hour_zhu: build_zhu(pillars[3], rizhu)?,
        rizhu,
    };
    Ok(Chart { sizhu, gender, birth_time })
}

/// 从精简存储索引重建命盘
pub fn chart_from_index(
    index: &SiZhuIndex,
    gender: Gender,
    birth_time: BirthTime,
) -> Result<Chart, ChartError> {
    let pillars = index.pillars().ok_or(ChartError::UnknownBranchOrStem)?;
    build_chart_from_pillars(&pillars, gender, birth_time)
}

// ============================================================================
// 五行强度
// ============================================================================

/// 五行强度三遍计算
///
/// 1. 基础分：四天干各记 1 分，四地支按藏干权重 3/2/1 记分
/// 2. 季节增强：月支当令五行乘以季节系数，仅该一行受影响
/// 3. 特殊格局：日主五行基础分占比达阈值时一行独旺，加 5 分
pub fn element_strength(chart: &Chart) -> ElementScore {
    let mut score = ElementScore::default();

    for gan in chart.sizhu.stems() {
        score.add(gan.to_wuxing(), 10);
    }
    for zhi in chart.sizhu.branches() {
        if let Some(entries) = canggan_of(zhi) {
            for &(gan_index, weight) in entries.iter() {
                if let Some(gan) = TianGan::from_index(gan_index) {
                    score.add(gan.to_wuxing(), u16::from(weight) * 10);
                }
            }
        }
    }

    // 格局判定基于增强前的基础分
    let base = score;

    let month_zhi = chart.sizhu.month_zhu.ganzhi.zhi;
    if let Some(&(wx, factor)) = SEASON_TABLE.get(month_zhi.0 as usize) {
        let slot = wx.index();
        let boosted = (u32::from(score.tenths[slot]) * u32::from(factor) + 5) / 10;
        score.tenths[slot] = boosted.min(u32::from(u16::MAX)) as u16;
    }

    let total: u32 = base.tenths.iter().map(|&t| u32::from(t)).sum();
    let day_wx = chart.sizhu.rizhu.to_wuxing();
    if total > 0 && u32::from(base.get(day_wx)) * 100 >= total * DOMINANCE_THRESHOLD_PERCENT {
        score.add(day_wx, DOMINANCE_BONUS_TENTHS);
    }

    score
}

// ============================================================================
// 十神
// ============================================================================

/// 地支是否与上下文地支构成三合局（取局中另外两支判断）
fn has_sanhe_combination(zhi: DiZhi, context: &[DiZhi]) -> bool {
    for triad in SANHE_TRIADS.iter() {
        if !triad.contains(&zhi.0) {
            continue;
        }
        return triad
            .iter()
            .filter(|&&member| member != zhi.0)
            .any(|&member| context.iter().any(|c| c.0 == member));
    }
    false
}

/// 日主五行与藏干五行是否存在生克关系（日主 → 藏干方向）
fn day_relates_to(day: TianGan, gan: TianGan) -> bool {
    let day_wx = day.to_wuxing();
    let gan_wx = gan.to_wuxing();
    day_wx.sheng(gan_wx) || day_wx.ke(gan_wx)
}

/// 地支十神列表（含补气规则）
///
/// - 主气（权重 3）无条件收录并置于首位
/// - 中气（权重 2）仅在补气条件成立时收录：
///   该支与上下文地支成三合局，或藏干五行与日主有生克关系
/// - 余气（权重 1）从不收录
pub fn branch_shishen(
    zhi: DiZhi,
    day: TianGan,
    context: &[DiZhi],
) -> Result<ZhiShiShen, ChartError> {
    let entries = canggan_of(zhi).ok_or(ChartError::UnknownBranchOrStem)?;

    let mut result: Vec<ShiShen> = Vec::with_capacity(entries.len());
    for &(gan_index, weight) in entries.iter() {
        let gan = TianGan::from_index(gan_index).ok_or(ChartError::UnknownBranchOrStem)?;
        let relation = gan_shishen(day, gan)?;

        if weight == 3 {
            result.insert(0, relation);
            continue;
        }
        if weight < 2 {
            continue;
        }
        if has_sanhe_combination(zhi, context) || day_relates_to(day, gan) {
            result.push(relation);
        }
    }

    Ok(ZhiShiShen::truncate_from(result))
}

/// 全盘十神关系
///
/// 日柱天干为日主标签（位置标记，不经计算）；四支的上下文
/// 均为全盘四支。
pub fn ten_gods(chart: &Chart) -> Result<ShiShenRelations, ChartError> {
    let rizhu = chart.sizhu.rizhu;
    let branches = chart.sizhu.branches();

    Ok(ShiShenRelations {
        year_gan: gan_shishen(rizhu, chart.sizhu.year_zhu.ganzhi.gan)?,
        month_gan: gan_shishen(rizhu, chart.sizhu.month_zhu.ganzhi.gan)?,
        day_gan: GanRelation::RiZhu,
        hour_gan: gan_shishen(rizhu, chart.sizhu.hour_zhu.ganzhi.gan)?,
        year_zhi: branch_shishen(branches[0], rizhu, &branches)?,
        month_zhi: branch_shishen(branches[1], rizhu, &branches)?,
        day_zhi: branch_shishen(branches[2], rizhu, &branches)?,
        hour_zhi: branch_shishen(branches[3], rizhu, &branches)?,
    })
}

// ============================================================================
// 大运
// ============================================================================

/// 大运顺逆：男命阴日干逆排，女命阳日干逆排，其余顺排
pub fn da_yun_reverse(rizhu: TianGan, gender: Gender) -> bool {
    match gender {
        Gender::Male => rizhu.yin_yang() == YinYang::Yin,
        Gender::Female => rizhu.yin_yang() == YinYang::Yang,
    }
}

/// 推算十步大运
///
/// 以日柱干支为起点，第 i 步干支索引偏移 ±i（模 10/12）。
/// 起运虚岁采用简化模型：`当前年 − 出生年 + 1`，第 i 步起于
/// `起运虚岁 + (i−1)×10`。
pub fn project_da_yun(
    chart: &Chart,
    current_year: u16,
) -> Result<ProjectionVec<DaYunStep>, ChartError> {
    let day = chart.sizhu.day_zhu.ganzhi;
    let reverse = da_yun_reverse(chart.sizhu.rizhu, chart.gender);
    let base_age = current_year
        .saturating_sub(chart.birth_time.year)
        .saturating_add(1);

    let mut steps: Vec<DaYunStep> = Vec::with_capacity(10);
    for i in 1..=10i32 {
        let offset = if reverse { -i } else { i };
        let gan = (i32::from(day.gan.0) + offset).rem_euclid(10) as u8;
        let zhi = (i32::from(day.zhi.0) + offset).rem_euclid(12) as u8;
        let ganzhi = GanZhi {
            gan: TianGan::from_index(gan).ok_or(ChartError::UnknownBranchOrStem)?,
            zhi: DiZhi::from_index(zhi).ok_or(ChartError::UnknownBranchOrStem)?,
        };
        let nayin = nayin_of(ganzhi).ok_or(ChartError::UnknownBranchOrStem)?;
        let start_age = base_age.saturating_add((i as u16 - 1) * 10);
        steps.push(DaYunStep { ganzhi, start_age, nayin });
    }

    Ok(ProjectionVec::truncate_from(steps))
}

// ============================================================================
// 流年
// ============================================================================

/// 推算十步流年
///
/// 自出生年起逐年取年干支（由历法适配器给出），每年附带
/// 太岁、岁破、天乙贵人。
pub fn project_liu_nian<C: CalendarProvider>(
    chart: &Chart,
    now: Moment,
) -> Result<ProjectionVec<LiuNianStep>, ChartError> {
    let mut steps: Vec<LiuNianStep> = Vec::with_capacity(10);
    for offset in 0..10u16 {
        let year = chart.birth_time.year.saturating_add(offset);
        let ganzhi = C::year_ganzhi(year).ok_or(ChartError::InvalidDate)?;
        let nayin = nayin_of(ganzhi).ok_or(ChartError::UnknownBranchOrStem)?;
        let shensha = crate::shensha::liu_nian_shensha::<C>(chart, year, now)?;
        steps.push(LiuNianStep { year, ganzhi, nayin, shensha });
    }
    Ok(ProjectionVec::truncate_from(steps))
}
