//! # 神煞查询
//!
//! 全部神煞来自固定查表：日干系（天乙、文昌、金舆、禄神、羊刃）、
//! 年支三合局系（桃花、驿马、将星、华盖）、日柱系（魁罡），以及
//! 流年配套的太岁、岁破、天乙。
//!
//! 太岁以立春为换年界：当前时刻早于目标年立春时值年退一年。
//! 立春时刻由历法适配器提供；适配器未声明节气能力时退化为
//! 不调整。

use pallet_paipan_common::{CalendarProvider, DiZhi, Moment, TianGan};

use crate::constants::{
    HUAGAI_TABLE, JIANGXING_TABLE, JINYU_TABLE, KUIGANG_DAYS, LUSHEN_TABLE, TAOHUA_TABLE,
    TIANYI_TABLE, WENCHANG_TABLE, YANGREN_TABLE, YIMA_TABLE,
};
use crate::types::{Chart, ChartError, LiuNianShenSha, ShenShaResult, TaiSuiInfo};

/// 单键查表，越界报 `UnknownBranchOrStem`
fn lookup_zhi(table: &[u8], index: u8) -> Result<DiZhi, ChartError> {
    table
        .get(index as usize)
        .and_then(|&z| DiZhi::from_index(z))
        .ok_or(ChartError::UnknownBranchOrStem)
}

/// 天乙贵人（日干定，恒为两支）
pub fn tian_yi(rizhu: TianGan) -> Result<[DiZhi; 2], ChartError> {
    let pair = TIANYI_TABLE
        .get(rizhu.0 as usize)
        .ok_or(ChartError::UnknownBranchOrStem)?;
    Ok([
        DiZhi::from_index(pair[0]).ok_or(ChartError::UnknownBranchOrStem)?,
        DiZhi::from_index(pair[1]).ok_or(ChartError::UnknownBranchOrStem)?,
    ])
}

/// 命盘神煞逐项解析
pub fn resolve_stars(chart: &Chart) -> Result<ShenShaResult, ChartError> {
    let rizhu = chart.sizhu.rizhu;
    let year_zhi = chart.sizhu.year_zhu.ganzhi.zhi;
    let day_ganzhi = chart.sizhu.day_zhu.ganzhi;

    let yang_ren = match YANGREN_TABLE
        .get(rizhu.0 as usize)
        .ok_or(ChartError::UnknownBranchOrStem)?
    {
        Some(z) => Some(DiZhi::from_index(*z).ok_or(ChartError::UnknownBranchOrStem)?),
        None => None,
    };

    Ok(ShenShaResult {
        tian_yi: tian_yi(rizhu)?,
        wen_chang: lookup_zhi(&WENCHANG_TABLE, rizhu.0)?,
        tao_hua: lookup_zhi(&TAOHUA_TABLE, year_zhi.0)?,
        yi_ma: lookup_zhi(&YIMA_TABLE, year_zhi.0)?,
        jiang_xing: lookup_zhi(&JIANGXING_TABLE, year_zhi.0)?,
        hua_gai: lookup_zhi(&HUAGAI_TABLE, year_zhi.0)?,
        jin_yu: lookup_zhi(&JINYU_TABLE, rizhu.0)?,
        lu_shen: lookup_zhi(&LUSHEN_TABLE, rizhu.0)?,
        yang_ren,
        kui_gang: KUIGANG_DAYS.contains(&(day_ganzhi.gan.0, day_ganzhi.zhi.0)),
    })
}

/// 太岁：换年界调整后查值年干支
///
/// 当前时刻早于目标年立春时，值年取上一年。
pub fn tai_sui<C: CalendarProvider>(
    target_year: u16,
    now: Moment,
) -> Result<TaiSuiInfo, ChartError> {
    let adjusted = if C::capabilities().solar_terms {
        match C::start_of_spring(target_year) {
            Some(spring) if now < spring => target_year.saturating_sub(1),
            _ => target_year,
        }
    } else {
        target_year
    };

    let ganzhi = C::year_ganzhi(adjusted).ok_or(ChartError::InvalidDate)?;
    Ok(TaiSuiInfo { year: adjusted, ganzhi, zhi: ganzhi.zhi })
}

/// 单年流年神煞：太岁 + 岁破 + 天乙
pub fn liu_nian_shensha<C: CalendarProvider>(
    chart: &Chart,
    target_year: u16,
    now: Moment,
) -> Result<LiuNianShenSha, ChartError> {
    Ok(LiuNianShenSha {
        tai_sui: tai_sui::<C>(target_year, now)?,
        // 岁破为命主年支对冲
        sui_po: chart.sizhu.year_zhu.ganzhi.zhi.opposite(),
        tian_yi: tian_yi(chart.sizhu.rizhu)?,
    })
}
