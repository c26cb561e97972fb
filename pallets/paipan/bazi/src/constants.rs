//! # 排盘固定查表
//!
//! 所有查表在此集中声明为静态常量，各处只读引用，不在函数内
//! 重复定义。同一地支只允许一份藏干定义，`consistency_check`
//! 在接入时校验表结构，歧义直接失败而不是静默取后声明者。
//!
//! ## 索引约定
//!
//! - 天干: 甲(0) 乙(1) 丙(2) 丁(3) 戊(4) 己(5) 庚(6) 辛(7) 壬(8) 癸(9)
//! - 地支: 子(0) 丑(1) 寅(2) 卯(3) 辰(4) 巳(5) 午(6) 未(7) 申(8) 酉(9) 戌(10) 亥(11)
//! - 十神: 比肩(0) 劫财(1) 食神(2) 伤官(3) 偏财(4) 正财(5) 七杀(6) 正官(7) 偏印(8) 正印(9)

use pallet_paipan_common::{DiZhi, GanZhi, WuXing};

use crate::types::NaYin;

// ============================================================================
// 藏干
// ============================================================================

/// 地支藏干表：(天干索引, 权重)，权重 3=主气 2=中气 1=余气
///
/// 每支恰有一个权重 3 的主气，且列表按权重降序。
/// 辰藏干取戊乙癸（主流派）。
pub const CANGGAN_TABLE: [&[(u8, u8)]; 12] = [
    &[(9, 3)],                 // 子: 癸
    &[(5, 3), (7, 2), (9, 1)], // 丑: 己辛癸
    &[(0, 3), (2, 2), (4, 1)], // 寅: 甲丙戊
    &[(1, 3)],                 // 卯: 乙
    &[(4, 3), (1, 2), (9, 1)], // 辰: 戊乙癸
    &[(2, 3), (4, 2), (6, 1)], // 巳: 丙戊庚
    &[(3, 3), (5, 2)],         // 午: 丁己
    &[(5, 3), (3, 2), (1, 1)], // 未: 己丁乙
    &[(6, 3), (8, 2), (4, 1)], // 申: 庚壬戊
    &[(7, 3)],                 // 酉: 辛
    &[(4, 3), (7, 2), (3, 1)], // 戌: 戊辛丁
    &[(8, 3), (0, 1)],         // 亥: 壬甲
];

/// 查询地支藏干，索引越界返回 None
pub fn canggan_of(zhi: DiZhi) -> Option<&'static [(u8, u8)]> {
    CANGGAN_TABLE.get(zhi.0 as usize).copied()
}

// ============================================================================
// 十神
// ============================================================================

/// 十神对照表：`SHISHEN_TABLE[日干][对方干]` 给出十神索引
///
/// 每行是 0..10 的一个排列：对每个日干，十类十神与十个天干
/// 一一对应（含日干自对，为比肩）。
pub const SHISHEN_TABLE: [[u8; 10]; 10] = [
    [0, 1, 2, 3, 4, 5, 6, 7, 9, 8], // 甲
    [1, 0, 3, 2, 5, 4, 7, 6, 8, 9], // 乙
    [9, 8, 0, 1, 2, 3, 4, 5, 6, 7], // 丙
    [8, 9, 1, 0, 3, 2, 5, 4, 7, 6], // 丁
    [6, 7, 9, 8, 0, 1, 2, 3, 4, 5], // 戊
    [7, 6, 8, 9, 1, 0, 3, 2, 5, 4], // 己
    [4, 5, 6, 7, 9, 8, 0, 1, 2, 3], // 庚
    [5, 4, 7, 6, 8, 9, 1, 0, 3, 2], // 辛
    [2, 3, 4, 5, 6, 7, 9, 8, 0, 1], // 壬
    [3, 2, 5, 4, 7, 6, 9, 8, 1, 0], // 癸
];

// ============================================================================
// 季节增强
// ============================================================================

/// 月令季节增强表：地支索引 → (当令五行, 系数×10)
///
/// 寅卯月木旺、巳午月火旺、申酉月金旺、亥子月水旺，
/// 辰未戌丑四季月土旺。系数只作用于当令五行。
pub const SEASON_TABLE: [(WuXing, u16); 12] = [
    (WuXing::Shui, 12), // 子
    (WuXing::Tu, 11),   // 丑
    (WuXing::Mu, 13),   // 寅
    (WuXing::Mu, 12),   // 卯
    (WuXing::Tu, 11),   // 辰
    (WuXing::Huo, 13),  // 巳
    (WuXing::Huo, 12),  // 午
    (WuXing::Tu, 11),   // 未
    (WuXing::Jin, 13),  // 申
    (WuXing::Jin, 12),  // 酉
    (WuXing::Tu, 11),   // 戌
    (WuXing::Shui, 13), // 亥
];

/// 特殊格局（一行独旺）判定阈值：日主五行基础分占比（百分数）
pub const DOMINANCE_THRESHOLD_PERCENT: u32 = 60;

/// 特殊格局加成（单位 0.1，即 +5 分）
pub const DOMINANCE_BONUS_TENTHS: u16 = 50;

// ============================================================================
// 纳音
// ============================================================================

/// 纳音名称表，六十甲子两两一组（甲子乙丑=海中金 ...）
pub const NAYIN_NAMES: [&str; 30] = [
    "海中金", "炉中火", "大林木", "路旁土", "剑锋金", "山头火", "涧下水", "城头土",
    "白蜡金", "杨柳木", "泉中水", "屋上土", "霹雳火", "松柏木", "长流水", "砂石金",
    "山下火", "平地木", "壁上土", "金箔金", "覆灯火", "天河水", "大驿土", "钗钏金",
    "桑柘木", "大溪水", "沙中土", "天上火", "石榴木", "大海水",
];

/// 干支纳音，非法组合返回 None
pub fn nayin_of(ganzhi: GanZhi) -> Option<NaYin> {
    Some(NaYin(ganzhi.index()? / 2))
}

// ============================================================================
// 时辰
// ============================================================================

/// 时辰窗口表：地支索引 → [起始时, 结束时)，子时跨午夜 23:00-01:00
pub const HOUR_WINDOWS: [(u8, u8); 12] = [
    (23, 1), // 子
    (1, 3),  // 丑
    (3, 5),  // 寅
    (5, 7),  // 卯
    (7, 9),  // 辰
    (9, 11), // 巳
    (11, 13), // 午
    (13, 15), // 未
    (15, 17), // 申
    (17, 19), // 酉
    (19, 21), // 戌
    (21, 23), // 亥
];

// ============================================================================
// 三合局
// ============================================================================

/// 三合局（各取三支）：申子辰、寅午戌、巳酉丑、亥卯未
pub const SANHE_TRIADS: [[u8; 3]; 4] = [
    [8, 0, 4],  // 申子辰
    [2, 6, 10], // 寅午戌
    [5, 9, 1],  // 巳酉丑
    [11, 3, 7], // 亥卯未
];

// ============================================================================
// 神煞
// ============================================================================

/// 天乙贵人表：日干索引 → 两贵人支
///
/// 源数据存在两份冲突声明，此处取覆盖全部十干的完整表为准：
/// 甲戊→丑未、乙己→子申、丙丁→亥酉、庚→寅午、辛壬→卯巳、癸→寅午。
pub const TIANYI_TABLE: [[u8; 2]; 10] = [
    [1, 7],  // 甲: 丑未
    [0, 8],  // 乙: 子申
    [11, 9], // 丙: 亥酉
    [11, 9], // 丁: 亥酉
    [1, 7],  // 戊: 丑未
    [0, 8],  // 己: 子申
    [2, 6],  // 庚: 寅午
    [3, 5],  // 辛: 卯巳
    [3, 5],  // 壬: 卯巳
    [2, 6],  // 癸: 寅午
];

/// 文昌表：日干索引 → 文昌支
pub const WENCHANG_TABLE: [u8; 10] = [
    5,  // 甲: 巳
    6,  // 乙: 午
    8,  // 丙: 申
    9,  // 丁: 酉
    8,  // 戊: 申
    9,  // 己: 酉
    11, // 庚: 亥
    0,  // 辛: 子
    2,  // 壬: 寅
    3,  // 癸: 卯
];

/// 桃花表：年支索引 → 桃花支（申子辰→酉、寅午戌→卯、巳酉丑→午、亥卯未→子）
pub const TAOHUA_TABLE: [u8; 12] = [9, 6, 3, 0, 9, 6, 3, 0, 9, 6, 3, 0];

/// 驿马表：年支索引 → 驿马支（申子辰→寅、寅午戌→申、巳酉丑→亥、亥卯未→巳）
pub const YIMA_TABLE: [u8; 12] = [2, 11, 8, 5, 2, 11, 8, 5, 2, 11, 8, 5];

/// 将星表：年支索引 → 将星支（申子辰→子、寅午戌→午、巳酉丑→酉、亥卯未→卯）
pub const JIANGXING_TABLE: [u8; 12] = [0, 9, 6, 3, 0, 9, 6, 3, 0, 9, 6, 3];

/// 华盖表：年支索引 → 华盖支（申子辰→辰、寅午戌→戌、巳酉丑→丑、亥卯未→未）
pub const HUAGAI_TABLE: [u8; 12] = [4, 1, 10, 7, 4, 1, 10, 7, 4, 1, 10, 7];

/// 金舆表：日干索引 → 金舆支
pub const JINYU_TABLE: [u8; 10] = [
    4,  // 甲: 辰
    5,  // 乙: 巳
    7,  // 丙: 未
    8,  // 丁: 申
    7,  // 戊: 未
    8,  // 己: 申
    10, // 庚: 戌
    11, // 辛: 亥
    1,  // 壬: 丑
    2,  // 癸: 寅
];

/// 禄神表：日干索引 → 禄神支
pub const LUSHEN_TABLE: [u8; 10] = [
    2,  // 甲: 寅
    3,  // 乙: 卯
    5,  // 丙: 巳
    6,  // 丁: 午
    5,  // 戊: 巳
    6,  // 己: 午
    8,  // 庚: 申
    9,  // 辛: 酉
    11, // 壬: 亥
    0,  // 癸: 子
];

/// 羊刃表：日干索引 → 羊刃支，仅阳干有羊刃
pub const YANGREN_TABLE: [Option<u8>; 10] = [
    Some(3), // 甲: 卯
    None,    // 乙
    Some(6), // 丙: 午
    None,    // 丁
    Some(6), // 戊: 午
    None,    // 己
    Some(9), // 庚: 酉
    None,    // 辛
    Some(0), // 壬: 子
    None,    // 癸
];

/// 魁罡日：(日干索引, 日支索引)，庚辰 庚戌 壬辰 戊戌
pub const KUIGANG_DAYS: [(u8, u8); 4] = [(6, 4), (6, 10), (8, 4), (4, 10)];

// ============================================================================
// 一致性校验
// ============================================================================

/// 接入时的查表一致性校验
///
/// 校验内容：
/// - 藏干表每支 1-3 项、恰有一个权重 3 的主气置于首位、
///   权重严格降序且取值于 {3,2,1}、天干索引合法、无重复天干
/// - 十神表每行为 0..10 的排列（逐日干双射）
/// - 三合局四组互斥，恰好覆盖十二支
/// - 各神煞表给出的支索引合法
pub fn consistency_check() -> Result<(), &'static str> {
    // 藏干表
    for entries in CANGGAN_TABLE.iter() {
        if entries.is_empty() || entries.len() > 3 {
            return Err("藏干数量越界");
        }
        if entries[0].1 != 3 {
            return Err("主气未置于首位");
        }
        let mut seen = [false; 10];
        let mut main_count = 0;
        let mut prev_weight = 4u8;
        for &(gan, weight) in entries.iter() {
            if gan >= 10 {
                return Err("藏干天干索引越界");
            }
            if !(1..=3).contains(&weight) {
                return Err("藏干权重越界");
            }
            if weight >= prev_weight {
                return Err("藏干权重未严格降序");
            }
            if weight == 3 {
                main_count += 1;
            }
            if seen[gan as usize] {
                return Err("藏干重复定义");
            }
            seen[gan as usize] = true;
            prev_weight = weight;
        }
        if main_count != 1 {
            return Err("主气不唯一");
        }
    }

    // 十神表逐行双射
    for row in SHISHEN_TABLE.iter() {
        let mut seen = [false; 10];
        for &s in row.iter() {
            if s >= 10 || seen[s as usize] {
                return Err("十神表非排列");
            }
            seen[s as usize] = true;
        }
    }

    // 三合局覆盖性
    let mut covered = [false; 12];
    for triad in SANHE_TRIADS.iter() {
        for &zhi in triad.iter() {
            if zhi >= 12 || covered[zhi as usize] {
                return Err("三合局定义冲突");
            }
            covered[zhi as usize] = true;
        }
    }

    // 神煞表索引范围
    for pair in TIANYI_TABLE.iter() {
        if pair.iter().any(|&z| z >= 12) {
            return Err("天乙贵人表索引越界");
        }
    }
    for table in [&WENCHANG_TABLE[..], &JINYU_TABLE[..], &LUSHEN_TABLE[..]] {
        if table.iter().any(|&z| z >= 12) {
            return Err("日干神煞表索引越界");
        }
    }
    for table in [&TAOHUA_TABLE, &YIMA_TABLE, &JIANGXING_TABLE, &HUAGAI_TABLE] {
        if table.iter().any(|&z| z >= 12) {
            return Err("年支神煞表索引越界");
        }
    }
    if YANGREN_TABLE.iter().flatten().any(|&z| z >= 12) {
        return Err("羊刃表索引越界");
    }
    if KUIGANG_DAYS.iter().any(|&(g, z)| g >= 10 || z >= 12) {
        return Err("魁罡表索引越界");
    }

    Ok(())
}
