//! # 干支基础类型与历法数据结构
//!
//! ## 天干地支索引
//!
//! - 天干: 甲(0) 乙(1) 丙(2) 丁(3) 戊(4) 己(5) 庚(6) 辛(7) 壬(8) 癸(9)
//! - 地支: 子(0) 丑(1) 寅(2) 卯(3) 辰(4) 巳(5) 午(6) 未(7) 申(8) 酉(9) 戌(10) 亥(11)
//!
//! 干支组合按六十甲子排序：甲子(0) 乙丑(1) ... 癸亥(59)。
//! 合法组合要求天干地支阴阳同性（索引奇偶一致）。

use codec::{Decode, DecodeWithMemTracking, Encode, MaxEncodedLen};
use scale_info::TypeInfo;
use sp_runtime::RuntimeDebug;

/// 时间戳类型（Unix 秒）
pub type Moment = u64;

/// 天干名称表
pub const TIANGAN_NAMES: [&str; 10] =
    ["甲", "乙", "丙", "丁", "戊", "己", "庚", "辛", "壬", "癸"];

/// 地支名称表
pub const DIZHI_NAMES: [&str; 12] =
    ["子", "丑", "寅", "卯", "辰", "巳", "午", "未", "申", "酉", "戌", "亥"];

/// 生肖名称表（与地支索引对齐）
pub const SHENGXIAO_NAMES: [&str; 12] =
    ["鼠", "牛", "虎", "兔", "龙", "蛇", "马", "羊", "猴", "鸡", "狗", "猪"];

/// 五行
#[derive(
    Clone, Copy, PartialEq, Eq, Encode, Decode, MaxEncodedLen, TypeInfo, RuntimeDebug,
)]
pub enum WuXing {
    /// 金
    Jin,
    /// 木
    Mu,
    /// 水
    Shui,
    /// 火
    Huo,
    /// 土
    Tu,
}

impl WuXing {
    /// 五行总数
    pub const COUNT: usize = 5;

    /// 按固定顺序（金木水火土）给出的索引，用于数组寻址
    pub fn index(self) -> usize {
        match self {
            WuXing::Jin => 0,
            WuXing::Mu => 1,
            WuXing::Shui => 2,
            WuXing::Huo => 3,
            WuXing::Tu => 4,
        }
    }

    /// 按索引还原五行
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(WuXing::Jin),
            1 => Some(WuXing::Mu),
            2 => Some(WuXing::Shui),
            3 => Some(WuXing::Huo),
            4 => Some(WuXing::Tu),
            _ => None,
        }
    }

    /// 相生：木生火、火生土、土生金、金生水、水生木
    pub fn sheng(self, other: WuXing) -> bool {
        matches!(
            (self, other),
            (WuXing::Mu, WuXing::Huo)
                | (WuXing::Huo, WuXing::Tu)
                | (WuXing::Tu, WuXing::Jin)
                | (WuXing::Jin, WuXing::Shui)
                | (WuXing::Shui, WuXing::Mu)
        )
    }

    /// 相克：木克土、土克水、水克火、火克金、金克木
    pub fn ke(self, other: WuXing) -> bool {
        matches!(
            (self, other),
            (WuXing::Mu, WuXing::Tu)
                | (WuXing::Tu, WuXing::Shui)
                | (WuXing::Shui, WuXing::Huo)
                | (WuXing::Huo, WuXing::Jin)
                | (WuXing::Jin, WuXing::Mu)
        )
    }

    /// 中文名称
    pub fn name(self) -> &'static str {
        match self {
            WuXing::Jin => "金",
            WuXing::Mu => "木",
            WuXing::Shui => "水",
            WuXing::Huo => "火",
            WuXing::Tu => "土",
        }
    }
}

/// 阴阳
#[derive(
    Clone, Copy, PartialEq, Eq, Encode, Decode, MaxEncodedLen, TypeInfo, RuntimeDebug,
)]
pub enum YinYang {
    /// 阳
    Yang,
    /// 阴
    Yin,
}

/// 天干（索引 0-9）
#[derive(
    Clone, Copy, PartialEq, Eq, Encode, Decode, MaxEncodedLen, TypeInfo, RuntimeDebug,
)]
pub struct TianGan(pub u8);

impl TianGan {
    /// 按索引构造，越界返回 None
    pub fn from_index(index: u8) -> Option<Self> {
        (index < 10).then_some(TianGan(index))
    }

    /// 天干五行：甲乙木、丙丁火、戊己土、庚辛金、壬癸水
    pub fn to_wuxing(self) -> WuXing {
        match self.0 {
            0 | 1 => WuXing::Mu,
            2 | 3 => WuXing::Huo,
            4 | 5 => WuXing::Tu,
            6 | 7 => WuXing::Jin,
            _ => WuXing::Shui,
        }
    }

    /// 阴阳：偶数索引为阳干
    pub fn yin_yang(self) -> YinYang {
        if self.0 % 2 == 0 {
            YinYang::Yang
        } else {
            YinYang::Yin
        }
    }

    /// 中文名称
    pub fn name(self) -> &'static str {
        TIANGAN_NAMES[self.0 as usize % 10]
    }
}

/// 地支（索引 0-11）
#[derive(
    Clone, Copy, PartialEq, Eq, Encode, Decode, MaxEncodedLen, TypeInfo, RuntimeDebug,
)]
pub struct DiZhi(pub u8);

impl DiZhi {
    /// 按索引构造，越界返回 None
    pub fn from_index(index: u8) -> Option<Self> {
        (index < 12).then_some(DiZhi(index))
    }

    /// 地支五行：亥子水、寅卯木、巳午火、申酉金，辰戌丑未土
    pub fn to_wuxing(self) -> WuXing {
        match self.0 {
            0 | 11 => WuXing::Shui,
            2 | 3 => WuXing::Mu,
            5 | 6 => WuXing::Huo,
            8 | 9 => WuXing::Jin,
            _ => WuXing::Tu,
        }
    }

    /// 对冲地支（相隔六位）
    pub fn opposite(self) -> DiZhi {
        DiZhi((self.0 + 6) % 12)
    }

    /// 中文名称
    pub fn name(self) -> &'static str {
        DIZHI_NAMES[self.0 as usize % 12]
    }

    /// 生肖名称
    pub fn zodiac(self) -> &'static str {
        SHENGXIAO_NAMES[self.0 as usize % 12]
    }
}

/// 干支组合
#[derive(
    Clone, Copy, PartialEq, Eq, Encode, Decode, MaxEncodedLen, TypeInfo, RuntimeDebug,
)]
pub struct GanZhi {
    pub gan: TianGan,
    pub zhi: DiZhi,
}

impl GanZhi {
    /// 从六十甲子索引构造（甲子=0 ... 癸亥=59）
    pub fn from_index(index: u8) -> Option<Self> {
        (index < 60).then_some(GanZhi {
            gan: TianGan(index % 10),
            zhi: DiZhi(index % 12),
        })
    }

    /// 六十甲子索引。非法组合（阴阳不同性）返回 None
    pub fn index(self) -> Option<u8> {
        if self.gan.0 >= 10 || self.zhi.0 >= 12 || self.gan.0 % 2 != self.zhi.0 % 2 {
            return None;
        }
        // 中国剩余定理的枚举形式：六十以内逐一对齐
        let mut i = self.gan.0;
        while i < 60 {
            if i % 12 == self.zhi.0 {
                return Some(i);
            }
            i += 10;
        }
        None
    }

    /// 下一个干支（六十甲子循环）
    pub fn next(self) -> GanZhi {
        GanZhi {
            gan: TianGan((self.gan.0 + 1) % 10),
            zhi: DiZhi((self.zhi.0 + 1) % 12),
        }
    }
}

/// 公历出生时间
#[derive(
    Clone, Copy, PartialEq, Eq, Encode, Decode, MaxEncodedLen, TypeInfo, RuntimeDebug,
)]
pub struct SolarDate {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
}

/// 农历日期
#[derive(
    Clone, Copy, PartialEq, Eq, Encode, Decode, MaxEncodedLen, TypeInfo, RuntimeDebug,
)]
pub struct LunarDate {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    /// 是否闰月
    pub is_leap_month: bool,
}

/// 历法解析输入（公历或农历）
#[derive(
    Clone, Copy, PartialEq, Eq, Encode, Decode, DecodeWithMemTracking, MaxEncodedLen, TypeInfo, RuntimeDebug,
)]
pub enum CalendarInput {
    /// 公历日期输入
    Solar { year: u16, month: u8, day: u8, hour: u8, minute: u8 },
    /// 农历日期输入（需标明是否闰月）
    Lunar { year: u16, month: u8, day: u8, is_leap_month: bool, hour: u8, minute: u8 },
}

impl CalendarInput {
    /// 输入范围校验（年 1900-2100，月 1-12，日 1-31，时 0-23，分 0-59）
    pub fn is_valid(&self) -> bool {
        let (year, month, day, hour, minute) = match self {
            CalendarInput::Solar { year, month, day, hour, minute } => {
                (*year, *month, *day, *hour, *minute)
            }
            CalendarInput::Lunar { year, month, day, hour, minute, .. } => {
                (*year, *month, *day, *hour, *minute)
            }
        };
        (1900..=2100).contains(&year)
            && (1..=12).contains(&month)
            && (1..=31).contains(&day)
            && hour <= 23
            && minute <= 59
    }

    /// 输入的小时（时辰校验用）
    pub fn hour(&self) -> u8 {
        match self {
            CalendarInput::Solar { hour, .. } | CalendarInput::Lunar { hour, .. } => *hour,
        }
    }
}

/// 历法适配器的解析结果：四柱干支 + 双历日期
#[derive(
    Clone, Copy, PartialEq, Eq, Encode, Decode, MaxEncodedLen, TypeInfo, RuntimeDebug,
)]
pub struct ResolvedBirth {
    /// 年、月、日、时四柱干支
    pub pillars: [GanZhi; 4],
    pub solar: SolarDate,
    pub lunar: LunarDate,
}

/// 历法适配错误
#[derive(
    Clone, Copy, PartialEq, Eq, Encode, Decode, MaxEncodedLen, TypeInfo, RuntimeDebug,
)]
pub enum CalendarError {
    /// 日期不存在或超出适配器支持范围
    InvalidDate,
    /// 请求的闰月在该农历年不存在
    LeapMonthNotFound,
}

/// 历法适配器能力声明
///
/// 可选能力以显式字段声明，接入时一次性校验，
/// 不在调用点对适配器做方法探测。
#[derive(
    Clone, Copy, PartialEq, Eq, Encode, Decode, MaxEncodedLen, TypeInfo, RuntimeDebug,
)]
pub struct CalendarCapabilities {
    /// 是否提供节气时刻（太岁换年界判定依赖立春）
    pub solar_terms: bool,
}
