//! # 测试模拟环境
//!
//! 为单元测试提供模拟的运行时环境。历法换算由 `CalendarProvider`
//! 适配器负责，测试环境使用预置少量日期的固定历表。

use crate as pallet_bazi_paipan;
use frame_support::{
    derive_impl,
    traits::{ConstU32, ConstU64},
};
use sp_runtime::BuildStorage;

use pallet_paipan_common::{
    CalendarCapabilities, CalendarError, CalendarInput, CalendarProvider, DiZhi, GanZhi,
    LunarDate, Moment, ResolvedBirth, SolarDate, TianGan,
};

type Block = frame_system::mocking::MockBlock<Test>;

pub const ALICE: u64 = 1;
pub const BOB: u64 = 2;

// 配置测试运行时
frame_support::construct_runtime!(
    pub enum Test
    {
        System: frame_system,
        Timestamp: pallet_timestamp,
        BaziPaipan: pallet_bazi_paipan,
    }
);

#[derive_impl(frame_system::config_preludes::TestDefaultConfig)]
impl frame_system::Config for Test {
    type Block = Block;
}

impl pallet_timestamp::Config for Test {
    type Moment = u64;
    type OnTimestampSet = ();
    type MinimumPeriod = ConstU64<5>;
    type WeightInfo = ();
}

impl pallet_bazi_paipan::Config for Test {
    type WeightInfo = ();
    type MaxChartsPerAccount = ConstU32<10>;
    type Calendar = FixtureCalendar;
}

/// 公历日期转 Unix 天数（civil-from-days 整数算法）
fn unix_days(year: i64, month: i64, day: i64) -> i64 {
    let y = if month <= 2 { year - 1 } else { year };
    let era = y.div_euclid(400);
    let yoe = y - era * 400;
    let doy = (153 * (if month > 2 { month - 3 } else { month + 9 }) + 2) / 5 + day - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146097 + doe - 719468
}

/// 公历零点的 Unix 秒
pub fn unix_time(year: u16, month: u8, day: u8) -> Moment {
    unix_days(i64::from(year), i64::from(month), i64::from(day)) as u64 * 86400
}

fn gz(gan: u8, zhi: u8) -> GanZhi {
    GanZhi { gan: TianGan(gan), zhi: DiZhi(zhi) }
}

/// 固定历表 Mock 适配器
///
/// 预置日期：
/// - 公历 1990-08-05 12:00 = 农历 1990 年七月十五 午时
///   四柱 庚午 丁未 甲子 丙午
/// - 农历 1990 年闰五月十五 午时（1990 年仅闰五月）
/// - 公历 2024-06-15 11:00 = 农历 2024 年五月初十 午时
pub struct FixtureCalendar;

impl CalendarProvider for FixtureCalendar {
    fn resolve(input: &CalendarInput) -> Result<ResolvedBirth, CalendarError> {
        // 1990 年仅有闰五月，其余闰月请求一律失败
        if let CalendarInput::Lunar { year, month, is_leap_month: true, .. } = *input {
            if year != 1990 || month != 5 {
                return Err(CalendarError::LeapMonthNotFound);
            }
        }

        match *input {
            CalendarInput::Solar { year: 1990, month: 8, day: 5, hour, minute }
            | CalendarInput::Lunar {
                year: 1990,
                month: 7,
                day: 15,
                is_leap_month: false,
                hour,
                minute,
            } => Ok(ResolvedBirth {
                pillars: [gz(6, 6), gz(3, 7), gz(0, 0), gz(2, 6)],
                solar: SolarDate { year: 1990, month: 8, day: 5, hour, minute },
                lunar: LunarDate { year: 1990, month: 7, day: 15, is_leap_month: false },
            }),
            CalendarInput::Lunar {
                year: 1990, month: 5, day: 15, is_leap_month: true, hour, minute,
            } => Ok(ResolvedBirth {
                pillars: [gz(6, 6), gz(8, 6), gz(2, 2), gz(0, 6)],
                solar: SolarDate { year: 1990, month: 7, day: 7, hour, minute },
                lunar: LunarDate { year: 1990, month: 5, day: 15, is_leap_month: true },
            }),
            CalendarInput::Solar { year: 2024, month: 6, day: 15, hour, minute }
            | CalendarInput::Lunar {
                year: 2024,
                month: 5,
                day: 10,
                is_leap_month: false,
                hour,
                minute,
            } => Ok(ResolvedBirth {
                pillars: [gz(0, 4), gz(6, 6), gz(7, 5), gz(0, 6)],
                solar: SolarDate { year: 2024, month: 6, day: 15, hour, minute },
                lunar: LunarDate { year: 2024, month: 5, day: 10, is_leap_month: false },
            }),
            _ => Err(CalendarError::InvalidDate),
        }
    }

    fn year_ganzhi(year: u16) -> Option<GanZhi> {
        if !(1900..=2100).contains(&year) {
            return None;
        }
        let offset = year - 4;
        Some(gz((offset % 10) as u8, (offset % 12) as u8))
    }

    fn start_of_spring(year: u16) -> Option<Moment> {
        // 测试历表统一取 2 月 4 日零点为立春
        (1900..=2100).contains(&year).then(|| unix_time(year, 2, 4))
    }

    fn year_of(now: Moment) -> u16 {
        let mut year = 1900u16;
        while year < 2100 && unix_time(year + 1, 1, 1) <= now {
            year += 1;
        }
        year
    }

    fn capabilities() -> CalendarCapabilities {
        CalendarCapabilities { solar_terms: true }
    }
}

// 构建测试用的存储
pub fn new_test_ext() -> sp_io::TestExternalities {
    let t = frame_system::GenesisConfig::<Test>::default()
        .build_storage()
        .unwrap();

    let mut ext = sp_io::TestExternalities::new(t);
    ext.execute_with(|| {
        System::set_block_number(1);
        // 默认链上时间：2025-03-01（已过当年立春）
        Timestamp::set_timestamp(unix_time(2025, 3, 1) * 1000);
    });
    ext
}
