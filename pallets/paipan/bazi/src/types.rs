//! # 八字排盘数据结构
//!
//! 命盘（Chart）一经构建不再修改，所有派生结果（五行强度、十神、
//! 大运、流年、神煞）都是命盘的纯函数，按查询实时计算，不落存储。

use codec::{Decode, DecodeWithMemTracking, Encode, MaxEncodedLen};
use frame_support::{pallet_prelude::ConstU32, BoundedVec};
use scale_info::TypeInfo;
use sp_runtime::RuntimeDebug;

use pallet_paipan_common::{DiZhi, GanZhi, TianGan};

/// 每个地支最多藏干数量（藏干表的结构上限）
pub const MAX_CANGGAN: u32 = 3;

/// 大运、流年固定步数
pub const PROJECTION_STEPS: u32 = 10;

/// 地支藏干十神列表
pub type ZhiShiShen = BoundedVec<ShiShen, ConstU32<MAX_CANGGAN>>;

/// 性别（决定大运顺逆）
#[derive(
    Clone, Copy, PartialEq, Eq, Encode, Decode, DecodeWithMemTracking, MaxEncodedLen, TypeInfo, RuntimeDebug,
)]
pub enum Gender {
    /// 男
    Male,
    /// 女
    Female,
}

/// 十神
///
/// 索引顺序固定：比肩(0) 劫财(1) 食神(2) 伤官(3) 偏财(4) 正财(5)
/// 七杀(6) 正官(7) 偏印(8) 正印(9)。
#[derive(
    Clone, Copy, PartialEq, Eq, Encode, Decode, MaxEncodedLen, TypeInfo, RuntimeDebug,
)]
pub enum ShiShen {
    /// 比肩
    BiJian,
    /// 劫财
    JieCai,
    /// 食神
    ShiShen,
    /// 伤官
    ShangGuan,
    /// 偏财
    PianCai,
    /// 正财
    ZhengCai,
    /// 七杀
    QiSha,
    /// 正官
    ZhengGuan,
    /// 偏印
    PianYin,
    /// 正印
    ZhengYin,
}

impl ShiShen {
    /// 按固定索引构造
    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(ShiShen::BiJian),
            1 => Some(ShiShen::JieCai),
            2 => Some(ShiShen::ShiShen),
            3 => Some(ShiShen::ShangGuan),
            4 => Some(ShiShen::PianCai),
            5 => Some(ShiShen::ZhengCai),
            6 => Some(ShiShen::QiSha),
            7 => Some(ShiShen::ZhengGuan),
            8 => Some(ShiShen::PianYin),
            9 => Some(ShiShen::ZhengYin),
            _ => None,
        }
    }

    /// 固定索引
    pub fn index(self) -> u8 {
        match self {
            ShiShen::BiJian => 0,
            ShiShen::JieCai => 1,
            ShiShen::ShiShen => 2,
            ShiShen::ShangGuan => 3,
            ShiShen::PianCai => 4,
            ShiShen::ZhengCai => 5,
            ShiShen::QiSha => 6,
            ShiShen::ZhengGuan => 7,
            ShiShen::PianYin => 8,
            ShiShen::ZhengYin => 9,
        }
    }

    /// 中文名称
    pub fn name(self) -> &'static str {
        match self {
            ShiShen::BiJian => "比肩",
            ShiShen::JieCai => "劫财",
            ShiShen::ShiShen => "食神",
            ShiShen::ShangGuan => "伤官",
            ShiShen::PianCai => "偏财",
            ShiShen::ZhengCai => "正财",
            ShiShen::QiSha => "七杀",
            ShiShen::ZhengGuan => "正官",
            ShiShen::PianYin => "偏印",
            ShiShen::ZhengYin => "正印",
        }
    }
}

/// 天干位置标记
///
/// 日柱天干固定标记为日主，这是位置标签，不参与十神计算。
#[derive(
    Clone, Copy, PartialEq, Eq, Encode, Decode, MaxEncodedLen, TypeInfo, RuntimeDebug,
)]
pub enum GanRelation {
    /// 日主（仅用于日柱位置）
    RiZhu,
    /// 对日主的十神关系
    ShiShen(ShiShen),
}

/// 藏干类别
#[derive(
    Clone, Copy, PartialEq, Eq, Encode, Decode, MaxEncodedLen, TypeInfo, RuntimeDebug,
)]
pub enum CangGanType {
    /// 主气（权重 3）
    ZhuQi,
    /// 中气（权重 2）
    ZhongQi,
    /// 余气（权重 1）
    YuQi,
}

impl CangGanType {
    /// 由藏干权重归类
    pub fn from_weight(weight: u8) -> Option<Self> {
        match weight {
            3 => Some(CangGanType::ZhuQi),
            2 => Some(CangGanType::ZhongQi),
            1 => Some(CangGanType::YuQi),
            _ => None,
        }
    }
}

/// 单个藏干信息
#[derive(
    Clone, Copy, PartialEq, Eq, Encode, Decode, MaxEncodedLen, TypeInfo, RuntimeDebug,
)]
pub struct CangGanInfo {
    pub gan: TianGan,
    /// 对日主的十神
    pub shishen: ShiShen,
    pub canggan_type: CangGanType,
    /// 权重 3/2/1
    pub weight: u8,
}

/// 纳音（六十甲子两两一组，共 30 项）
#[derive(
    Clone, Copy, PartialEq, Eq, Encode, Decode, MaxEncodedLen, TypeInfo, RuntimeDebug,
)]
pub struct NaYin(pub u8);

impl NaYin {
    /// 中文名称
    pub fn name(self) -> &'static str {
        crate::constants::NAYIN_NAMES[self.0 as usize % 30]
    }
}

/// 单柱：干支 + 藏干 + 纳音
#[derive(Clone, PartialEq, Eq, Encode, Decode, MaxEncodedLen, TypeInfo, RuntimeDebug)]
pub struct Zhu {
    pub ganzhi: GanZhi,
    pub canggan: BoundedVec<CangGanInfo, ConstU32<MAX_CANGGAN>>,
    pub nayin: NaYin,
}

/// 四柱
#[derive(Clone, PartialEq, Eq, Encode, Decode, MaxEncodedLen, TypeInfo, RuntimeDebug)]
pub struct SiZhu {
    pub year_zhu: Zhu,
    pub month_zhu: Zhu,
    pub day_zhu: Zhu,
    pub hour_zhu: Zhu,
    /// 日主天干
    pub rizhu: TianGan,
}

impl SiZhu {
    /// 四柱地支（年、月、日、时序）
    pub fn branches(&self) -> [DiZhi; 4] {
        [
            self.year_zhu.ganzhi.zhi,
            self.month_zhu.ganzhi.zhi,
            self.day_zhu.ganzhi.zhi,
            self.hour_zhu.ganzhi.zhi,
        ]
    }

    /// 四柱天干（年、月、日、时序）
    pub fn stems(&self) -> [TianGan; 4] {
        [
            self.year_zhu.ganzhi.gan,
            self.month_zhu.ganzhi.gan,
            self.day_zhu.ganzhi.gan,
            self.hour_zhu.ganzhi.gan,
        ]
    }
}

/// 出生时间（存储原始输入时间）
#[derive(
    Clone, Copy, PartialEq, Eq, Encode, Decode, DecodeWithMemTracking, MaxEncodedLen, TypeInfo, RuntimeDebug,
)]
pub struct BirthTime {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
}

/// 命盘：四柱 + 日主 + 性别 + 出生时间，构建后不可变
#[derive(Clone, PartialEq, Eq, Encode, Decode, MaxEncodedLen, TypeInfo, RuntimeDebug)]
pub struct Chart {
    pub sizhu: SiZhu,
    pub gender: Gender,
    pub birth_time: BirthTime,
}

/// 四柱干支索引（精简存储形式，8 字节）
#[derive(
    Clone, Copy, PartialEq, Eq, Encode, Decode, MaxEncodedLen, TypeInfo, RuntimeDebug,
)]
pub struct SiZhuIndex {
    pub year_gan: u8,
    pub year_zhi: u8,
    pub month_gan: u8,
    pub month_zhi: u8,
    pub day_gan: u8,
    pub day_zhi: u8,
    pub hour_gan: u8,
    pub hour_zhi: u8,
}

impl SiZhuIndex {
    /// 从解析出的四柱干支构造
    pub fn from_pillars(pillars: &[GanZhi; 4]) -> Self {
        SiZhuIndex {
            year_gan: pillars[0].gan.0,
            year_zhi: pillars[0].zhi.0,
            month_gan: pillars[1].gan.0,
            month_zhi: pillars[1].zhi.0,
            day_gan: pillars[2].gan.0,
            day_zhi: pillars[2].zhi.0,
            hour_gan: pillars[3].gan.0,
            hour_zhi: pillars[3].zhi.0,
        }
    }

    /// 还原四柱干支，索引越界返回 None
    pub fn pillars(&self) -> Option<[GanZhi; 4]> {
        let build = |gan: u8, zhi: u8| -> Option<GanZhi> {
            Some(GanZhi { gan: TianGan::from_index(gan)?, zhi: DiZhi::from_index(zhi)? })
        };
        Some([
            build(self.year_gan, self.year_zhi)?,
            build(self.month_gan, self.month_zhi)?,
            build(self.day_gan, self.day_zhi)?,
            build(self.hour_gan, self.hour_zhi)?,
        ])
    }
}

/// 五行强度评分
///
/// 链上运行时不使用浮点数，分值以十分之一为单位定点存储
/// （`tenths = 52` 表示 5.2）。基础分为整数，季节增强系数
/// ×13/×12/×11 再除以 10，保留一位小数不损失精度。
#[derive(
    Clone, Copy, PartialEq, Eq, Default, Encode, Decode, MaxEncodedLen, TypeInfo, RuntimeDebug,
)]
pub struct ElementScore {
    /// 按金木水火土固定顺序存放，单位 0.1
    pub tenths: [u16; 5],
}

impl ElementScore {
    /// 数组槽位对应的五行顺序
    pub const ELEMENTS: [pallet_paipan_common::WuXing; 5] = [
        pallet_paipan_common::WuXing::Jin,
        pallet_paipan_common::WuXing::Mu,
        pallet_paipan_common::WuXing::Shui,
        pallet_paipan_common::WuXing::Huo,
        pallet_paipan_common::WuXing::Tu,
    ];

    /// 读取某五行的分值（单位 0.1）
    pub fn get(&self, wx: pallet_paipan_common::WuXing) -> u16 {
        self.tenths[wx.index()]
    }

    /// 累加分值（单位 0.1）
    pub fn add(&mut self, wx: pallet_paipan_common::WuXing, tenths: u16) {
        let slot = &mut self.tenths[wx.index()];
        *slot = slot.saturating_add(tenths);
    }

    /// 最旺五行（并列时取索引靠前者）
    pub fn strongest(&self) -> pallet_paipan_common::WuXing {
        let mut best = 0usize;
        for i in 1..5 {
            if self.tenths[i] > self.tenths[best] {
                best = i;
            }
        }
        Self::ELEMENTS[best]
    }

    /// 最弱五行（并列时取索引靠前者）
    pub fn weakest(&self) -> pallet_paipan_common::WuXing {
        let mut worst = 0usize;
        for i in 1..5 {
            if self.tenths[i] < self.tenths[worst] {
                worst = i;
            }
        }
        Self::ELEMENTS[worst]
    }
}

/// 四柱十神关系
///
/// 干的关系逐柱给出（日柱为日主标签），支的关系为藏干十神列表，
/// 主气恒在首位，余气（权重 1）从不显示。
#[derive(Clone, PartialEq, Eq, Encode, Decode, MaxEncodedLen, TypeInfo, RuntimeDebug)]
pub struct ShiShenRelations {
    pub year_gan: ShiShen,
    pub month_gan: ShiShen,
    pub day_gan: GanRelation,
    pub hour_gan: ShiShen,
    pub year_zhi: ZhiShiShen,
    pub month_zhi: ZhiShiShen,
    pub day_zhi: ZhiShiShen,
    pub hour_zhi: ZhiShiShen,
}

/// 单步大运
#[derive(
    Clone, Copy, PartialEq, Eq, Encode, Decode, MaxEncodedLen, TypeInfo, RuntimeDebug,
)]
pub struct DaYunStep {
    pub ganzhi: GanZhi,
    /// 起运虚岁
    pub start_age: u16,
    pub nayin: NaYin,
}

/// 太岁信息
#[derive(
    Clone, Copy, PartialEq, Eq, Encode, Decode, MaxEncodedLen, TypeInfo, RuntimeDebug,
)]
pub struct TaiSuiInfo {
    /// 换年界调整后的值年
    pub year: u16,
    pub ganzhi: GanZhi,
    /// 值年地支（生肖由此得出）
    pub zhi: DiZhi,
}

/// 单年流年神煞
#[derive(
    Clone, Copy, PartialEq, Eq, Encode, Decode, MaxEncodedLen, TypeInfo, RuntimeDebug,
)]
pub struct LiuNianShenSha {
    pub tai_sui: TaiSuiInfo,
    /// 岁破（年支对冲）
    pub sui_po: DiZhi,
    /// 天乙贵人（日干定，恒为两支）
    pub tian_yi: [DiZhi; 2],
}

/// 单步流年
#[derive(
    Clone, Copy, PartialEq, Eq, Encode, Decode, MaxEncodedLen, TypeInfo, RuntimeDebug,
)]
pub struct LiuNianStep {
    pub year: u16,
    pub ganzhi: GanZhi,
    pub nayin: NaYin,
    pub shensha: LiuNianShenSha,
}

/// 命盘神煞查询结果（固定规则逐项给出）
#[derive(
    Clone, Copy, PartialEq, Eq, Encode, Decode, MaxEncodedLen, TypeInfo, RuntimeDebug,
)]
pub struct ShenShaResult {
    /// 天乙贵人（日干）
    pub tian_yi: [DiZhi; 2],
    /// 文昌（日干）
    pub wen_chang: DiZhi,
    /// 桃花（年支三合局）
    pub tao_hua: DiZhi,
    /// 驿马（年支三合局）
    pub yi_ma: DiZhi,
    /// 将星（年支三合局）
    pub jiang_xing: DiZhi,
    /// 华盖（年支三合局）
    pub hua_gai: DiZhi,
    /// 金舆（日干）
    pub jin_yu: DiZhi,
    /// 禄神（日干）
    pub lu_shen: DiZhi,
    /// 羊刃（仅阳日干）
    pub yang_ren: Option<DiZhi>,
    /// 魁罡（日柱是否为庚辰/庚戌/壬辰/戊戌）
    pub kui_gang: bool,
}

/// 链上存储的命盘信息（精简形式）
///
/// 只存四柱索引与出生信息，派生结果（五行强度、十神、大运、
/// 流年、神煞）查询时实时计算。
#[derive(Clone, PartialEq, Eq, Encode, Decode, MaxEncodedLen, TypeInfo, RuntimeDebug)]
pub struct ChartInfo<AccountId, BlockNumber> {
    pub owner: AccountId,
    /// 命盘名称（可选，最大 32 字节 UTF-8）
    pub name: BoundedVec<u8, ConstU32<32>>,
    pub birth_time: BirthTime,
    pub gender: Gender,
    /// 四柱索引缓存
    pub sizhu_index: SiZhuIndex,
    pub created_at: BlockNumber,
}

/// 排盘计算错误
///
/// `UnknownBranchOrStem` 表示固定枚举查表落空，属程序缺陷信号，
/// 不是用户输入错误。
#[derive(
    Clone, Copy, PartialEq, Eq, Encode, Decode, MaxEncodedLen, TypeInfo, RuntimeDebug,
)]
pub enum ChartError {
    /// 历法适配器无法解析该日期
    InvalidDate,
    /// 计算时辰与适配器给出的时支不一致
    HourBranchMismatch { hour: u8, expected: DiZhi, actual: DiZhi },
    /// 该农历年月无闰月
    LeapMonthNotFound { year: u16, month: u8 },
    /// 干支索引查表落空
    UnknownBranchOrStem,
}
