//! # 排盘模块单元测试

use crate::{calculations, mock::*, shensha, Error};
use frame_support::{assert_noop, assert_ok};

use pallet_paipan_common::{
    CalendarInput, CalendarProvider, DiZhi, GanZhi, LunarDate, ResolvedBirth, SolarDate, TianGan,
    WuXing,
};

use crate::types::{
    BirthTime, ChartError, GanRelation, Gender, ShiShen,
};

type RuntimeOrigin = <Test as frame_system::Config>::RuntimeOrigin;

fn gz(gan: u8, zhi: u8) -> GanZhi {
    GanZhi { gan: TianGan(gan), zhi: DiZhi(zhi) }
}

/// 预置命盘输入：公历 1990-08-05 12:00（庚午 丁未 甲子 丙午）
fn fixture_input() -> CalendarInput {
    CalendarInput::Solar { year: 1990, month: 8, day: 5, hour: 12, minute: 0 }
}

fn create_fixture_chart(gender: Gender) -> u64 {
    assert_ok!(BaziPaipan::create_chart(
        RuntimeOrigin::signed(ALICE),
        None,
        fixture_input(),
        gender,
    ));
    BaziPaipan::next_chart_id() - 1
}

/// 直接装盘（跳过历法适配器），供纯算法断言使用
fn chart_from(pillars: [GanZhi; 4], gender: Gender, year: u16) -> crate::types::Chart {
    calculations::build_chart_from_pillars(
        &pillars,
        gender,
        BirthTime { year, month: 1, day: 1, hour: 0, minute: 0 },
    )
    .unwrap()
}

// ============ 命盘创建与存储 ============

#[test]
fn create_chart_works() {
    new_test_ext().execute_with(|| {
        assert_ok!(BaziPaipan::create_chart(
            RuntimeOrigin::signed(ALICE),
            Some(b"test".to_vec().try_into().unwrap()),
            fixture_input(),
            Gender::Male,
        ));

        let info = BaziPaipan::chart_by_id(0).unwrap();
        assert_eq!(info.owner, ALICE);
        assert_eq!(info.gender, Gender::Male);
        assert_eq!(info.birth_time.year, 1990);
        assert_eq!(info.sizhu_index.year_gan, 6); // 庚
        assert_eq!(info.sizhu_index.day_gan, 0); // 甲
        assert_eq!(info.sizhu_index.hour_zhi, 6); // 午

        assert_eq!(BaziPaipan::user_charts(ALICE).to_vec(), vec![0]);
        assert_eq!(BaziPaipan::next_chart_id(), 1);

        System::assert_last_event(
            crate::pallet::Event::ChartCreated {
                owner: ALICE,
                chart_id: 0,
                birth_time: BirthTime { year: 1990, month: 8, day: 5, hour: 12, minute: 0 },
            }
            .into(),
        );
    });
}

#[test]
fn create_chart_from_lunar_input_matches_solar() {
    new_test_ext().execute_with(|| {
        // 同一出生时刻的公历/农历输入得到相同四柱
        let solar_id = create_fixture_chart(Gender::Male);
        assert_ok!(BaziPaipan::create_chart(
            RuntimeOrigin::signed(ALICE),
            None,
            CalendarInput::Lunar {
                year: 1990,
                month: 7,
                day: 15,
                is_leap_month: false,
                hour: 12,
                minute: 0,
            },
            Gender::Male,
        ));
        let lunar_id = BaziPaipan::next_chart_id() - 1;

        let a = BaziPaipan::chart_by_id(solar_id).unwrap();
        let b = BaziPaipan::chart_by_id(lunar_id).unwrap();
        assert_eq!(a.sizhu_index, b.sizhu_index);
    });
}

#[test]
fn create_chart_rejects_out_of_range_input() {
    new_test_ext().execute_with(|| {
        assert_noop!(
            BaziPaipan::create_chart(
                RuntimeOrigin::signed(ALICE),
                None,
                CalendarInput::Solar { year: 1899, month: 1, day: 1, hour: 0, minute: 0 },
                Gender::Male,
            ),
            Error::<Test>::InvalidInput
        );
    });
}

#[test]
fn create_chart_rejects_nonexistent_date() {
    new_test_ext().execute_with(|| {
        // 范围合法但历表无此日期
        assert_noop!(
            BaziPaipan::create_chart(
                RuntimeOrigin::signed(ALICE),
                None,
                CalendarInput::Solar { year: 1990, month: 2, day: 30, hour: 12, minute: 0 },
                Gender::Male,
            ),
            Error::<Test>::InvalidDate
        );
    });
}

#[test]
fn leap_month_not_found_produces_no_chart() {
    new_test_ext().execute_with(|| {
        // 1990 年仅闰五月，请求闰七月失败，不产生命盘
        assert_noop!(
            BaziPaipan::create_chart(
                RuntimeOrigin::signed(ALICE),
                None,
                CalendarInput::Lunar {
                    year: 1990,
                    month: 7,
                    day: 15,
                    is_leap_month: true,
                    hour: 12,
                    minute: 0,
                },
                Gender::Male,
            ),
            Error::<Test>::LeapMonthNotFound
        );
        assert_eq!(BaziPaipan::next_chart_id(), 0);
        assert!(BaziPaipan::chart_by_id(0).is_none());
        assert!(BaziPaipan::user_charts(ALICE).is_empty());
    });
}

#[test]
fn existing_leap_month_is_accepted() {
    new_test_ext().execute_with(|| {
        assert_ok!(BaziPaipan::create_chart(
            RuntimeOrigin::signed(ALICE),
            None,
            CalendarInput::Lunar {
                year: 1990,
                month: 5,
                day: 15,
                is_leap_month: true,
                hour: 12,
                minute: 0,
            },
            Gender::Female,
        ));
        let info = BaziPaipan::chart_by_id(0).unwrap();
        assert_eq!(info.sizhu_index.month_gan, 8); // 壬
    });
}

#[test]
fn hour_branch_mismatch_rejected_at_dispatch() {
    new_test_ext().execute_with(|| {
        // 历表给出的时柱为丙午，23 时应为子时，属适配器配置冲突
        assert_noop!(
            BaziPaipan::create_chart(
                RuntimeOrigin::signed(ALICE),
                None,
                CalendarInput::Solar { year: 1990, month: 8, day: 5, hour: 23, minute: 0 },
                Gender::Male,
            ),
            Error::<Test>::HourBranchMismatch
        );
    });
}

#[test]
fn hour_branch_mismatch_carries_offending_input() {
    // 纯构建层错误带出冲突的小时与两侧时支
    let resolved = ResolvedBirth {
        pillars: [gz(6, 6), gz(3, 7), gz(0, 0), gz(2, 6)],
        solar: SolarDate { year: 1990, month: 8, day: 5, hour: 23, minute: 0 },
        lunar: LunarDate { year: 1990, month: 7, day: 15, is_leap_month: false },
    };
    assert_eq!(
        calculations::build_chart(&resolved, Gender::Male),
        Err(ChartError::HourBranchMismatch {
            hour: 23,
            expected: DiZhi(0),
            actual: DiZhi(6),
        })
    );
}

#[test]
fn chart_count_is_capped_per_account() {
    new_test_ext().execute_with(|| {
        for _ in 0..10 {
            assert_ok!(BaziPaipan::create_chart(
                RuntimeOrigin::signed(ALICE),
                None,
                fixture_input(),
                Gender::Male,
            ));
        }
        assert_noop!(
            BaziPaipan::create_chart(
                RuntimeOrigin::signed(ALICE),
                None,
                fixture_input(),
                Gender::Male,
            ),
            Error::<Test>::TooManyCharts
        );
    });
}

#[test]
fn delete_chart_works() {
    new_test_ext().execute_with(|| {
        let chart_id = create_fixture_chart(Gender::Male);

        assert_noop!(
            BaziPaipan::delete_chart(RuntimeOrigin::signed(BOB), chart_id),
            Error::<Test>::NotChartOwner
        );
        assert_ok!(BaziPaipan::delete_chart(RuntimeOrigin::signed(ALICE), chart_id));
        assert!(BaziPaipan::chart_by_id(chart_id).is_none());
        assert!(BaziPaipan::user_charts(ALICE).is_empty());

        assert_noop!(
            BaziPaipan::delete_chart(RuntimeOrigin::signed(ALICE), chart_id),
            Error::<Test>::ChartNotFound
        );
    });
}

// ============ 五行强度 ============

#[test]
fn element_strength_of_fixture_chart() {
    new_test_ext().execute_with(|| {
        let chart_id = create_fixture_chart(Gender::Male);
        let score = BaziPaipan::element_strength_of(chart_id).unwrap();

        // 庚午 丁未 甲子 丙午：基础分 金1 木2 水3 火10 土7，
        // 未月土旺 ×1.1 → 土 7.7
        assert_eq!(score.tenths, [10, 20, 30, 100, 77]);
        assert_eq!(score.strongest(), WuXing::Huo);
        assert_eq!(score.weakest(), WuXing::Jin);
    });
}

#[test]
fn seasonal_boost_touches_exactly_one_element() {
    let chart = chart_from([gz(6, 6), gz(3, 7), gz(0, 0), gz(2, 6)], Gender::Male, 1990);
    let score = calculations::element_strength(&chart);

    // 基础分手工核算：除当令土外其余与基础分一致
    assert_eq!(score.get(WuXing::Jin), 10);
    assert_eq!(score.get(WuXing::Mu), 20);
    assert_eq!(score.get(WuXing::Shui), 30);
    assert_eq!(score.get(WuXing::Huo), 100);
    assert_eq!(score.get(WuXing::Tu), 77);
}

#[test]
fn dominance_pattern_adds_flat_bonus() {
    // 全金局：庚申 辛酉 庚申 辛酉，日主庚金基础分 16/22 ≥ 60%
    let chart = chart_from([gz(6, 8), gz(7, 9), gz(6, 8), gz(7, 9)], Gender::Male, 2023);
    let score = calculations::element_strength(&chart);

    // 酉月金旺 16.0×1.2=19.2，格局加成 +5 → 24.2
    assert_eq!(score.get(WuXing::Jin), 242);
    assert_eq!(score.get(WuXing::Shui), 40);
    assert_eq!(score.get(WuXing::Tu), 20);
    assert_eq!(score.get(WuXing::Mu), 0);
    assert_eq!(score.get(WuXing::Huo), 0);
}

#[test]
fn no_dominance_bonus_below_threshold() {
    let chart = chart_from([gz(6, 6), gz(3, 7), gz(0, 0), gz(2, 6)], Gender::Male, 1990);
    let score = calculations::element_strength(&chart);
    // 日主甲木占比 2/23，无格局加成
    assert_eq!(score.get(WuXing::Mu), 20);
}

// ============ 十神 ============

#[test]
fn ten_gods_of_fixture_chart() {
    new_test_ext().execute_with(|| {
        let chart_id = create_fixture_chart(Gender::Male);
        let relations = BaziPaipan::ten_gods_of(chart_id).unwrap();

        // 日干甲：庚为七杀、丁为伤官、丙为食神，日柱为日主标签
        assert_eq!(relations.year_gan, ShiShen::QiSha);
        assert_eq!(relations.month_gan, ShiShen::ShangGuan);
        assert_eq!(relations.day_gan, GanRelation::RiZhu);
        assert_eq!(relations.hour_gan, ShiShen::ShiShen);

        // 午: 主气丁伤官 + 中气己（甲克己土生克成立）正财
        assert_eq!(relations.year_zhi.to_vec(), vec![ShiShen::ShangGuan, ShiShen::ZhengCai]);
        // 未: 主气己正财 + 中气丁（甲生丁火）伤官；余气乙从不显示
        assert_eq!(relations.month_zhi.to_vec(), vec![ShiShen::ZhengCai, ShiShen::ShangGuan]);
        // 子: 藏干仅癸一项
        assert_eq!(relations.day_zhi.to_vec(), vec![ShiShen::PianYin]);
        assert_eq!(relations.hour_zhi.to_vec(), vec![ShiShen::ShangGuan, ShiShen::ZhengCai]);
    });
}

#[test]
fn branch_relations_always_lead_with_main_qi() {
    // 任意日干、全上下文：主气恒在首位，余气（权重 1）从不出现
    let full_context: Vec<DiZhi> = (0..12).map(DiZhi).collect();
    for day in 0..10u8 {
        for zhi in 0..12u8 {
            let relations =
                calculations::branch_shishen(DiZhi(zhi), TianGan(day), &full_context).unwrap();
            assert!(!relations.is_empty());

            let entries = crate::constants::canggan_of(DiZhi(zhi)).unwrap();
            let main_gan = TianGan(entries[0].0);
            let expected_main =
                calculations::gan_shishen(TianGan(day), main_gan).unwrap();
            assert_eq!(relations[0], expected_main);

            // 全上下文时补气条件必然成立，收录数 = 权重≥2 的藏干数
            let expected_len = entries.iter().filter(|(_, w)| *w >= 2).count();
            assert_eq!(relations.len(), expected_len);
        }
    }
}

#[test]
fn hai_branch_never_shows_residual_qi() {
    // 亥藏壬甲，甲为权重 1 余气：即使与日主有生克也不显示
    let relations =
        calculations::branch_shishen(DiZhi(11), TianGan(0), &[DiZhi(3), DiZhi(7)]).unwrap();
    assert_eq!(relations.to_vec(), vec![ShiShen::ZhengYin]);
}

// ============ 大运 ============

#[test]
fn da_yun_forward_for_yang_male() {
    new_test_ext().execute_with(|| {
        let chart_id = create_fixture_chart(Gender::Male);
        let steps = BaziPaipan::da_yun_of(chart_id).unwrap();

        assert_eq!(steps.len(), 10);
        // 日柱甲子，阳干男命顺排：首步乙丑
        assert_eq!(steps[0].ganzhi, gz(1, 1));
        assert_eq!(steps[0].nayin.name(), "海中金");
        // 简化起运模型：2025 - 1990 + 1 = 36 虚岁
        assert_eq!(steps[0].start_age, 36);
        assert_eq!(steps[9].ganzhi, gz(0, 10)); // 甲戌
        assert_eq!(steps[9].start_age, 126);

        // 连续步进恒为 +1（模 10/12）
        for window in steps.windows(2) {
            assert_eq!((window[0].ganzhi.gan.0 + 1) % 10, window[1].ganzhi.gan.0);
            assert_eq!((window[0].ganzhi.zhi.0 + 1) % 12, window[1].ganzhi.zhi.0);
            assert_eq!(window[1].start_age - window[0].start_age, 10);
        }
    });
}

#[test]
fn da_yun_reverse_for_yang_female() {
    new_test_ext().execute_with(|| {
        let chart_id = create_fixture_chart(Gender::Female);
        let steps = BaziPaipan::da_yun_of(chart_id).unwrap();

        assert_eq!(steps.len(), 10);
        // 阳干女命逆排：首步癸亥
        assert_eq!(steps[0].ganzhi, gz(9, 11));
        assert_eq!(steps[0].nayin.name(), "大海水");

        for window in steps.windows(2) {
            assert_eq!((window[1].ganzhi.gan.0 + 1) % 10, window[0].ganzhi.gan.0);
            assert_eq!((window[1].ganzhi.zhi.0 + 1) % 12, window[0].ganzhi.zhi.0);
        }
    });
}

// ============ 流年与神煞 ============

#[test]
fn liu_nian_covers_ten_years_from_birth() {
    new_test_ext().execute_with(|| {
        let chart_id = create_fixture_chart(Gender::Male);
        let steps = BaziPaipan::liu_nian_of(chart_id).unwrap();

        assert_eq!(steps.len(), 10);
        assert_eq!(steps[0].year, 1990);
        assert_eq!(steps[0].ganzhi, gz(6, 6)); // 庚午
        assert_eq!(steps[0].nayin.name(), "路旁土");
        assert_eq!(steps[9].year, 1999);
        assert_eq!(steps[9].ganzhi, gz(5, 3)); // 己卯

        for window in steps.windows(2) {
            assert_eq!(window[1].year - window[0].year, 1);
            assert_eq!((window[0].ganzhi.gan.0 + 1) % 10, window[1].ganzhi.gan.0);
            assert_eq!((window[0].ganzhi.zhi.0 + 1) % 12, window[1].ganzhi.zhi.0);
        }

        // 当前时刻（2025-03-01）晚于各目标年立春，太岁不回退
        let shensha = steps[0].shensha;
        assert_eq!(shensha.tai_sui.year, 1990);
        assert_eq!(shensha.tai_sui.ganzhi, gz(6, 6));
        assert_eq!(shensha.tai_sui.zhi.zodiac(), "马");
        // 岁破为年支午的对冲子
        assert_eq!(shensha.sui_po, DiZhi(0));
        // 日干甲的天乙贵人：丑未
        assert_eq!(shensha.tian_yi, [DiZhi(1), DiZhi(7)]);
    });
}

#[test]
fn tai_sui_steps_back_before_start_of_spring() {
    new_test_ext().execute_with(|| {
        // 链上时间拨到 1990-01-15，早于 1990 年立春
        Timestamp::set_timestamp(unix_time(1990, 1, 15) * 1000);

        let chart_id = create_fixture_chart(Gender::Male);
        let steps = BaziPaipan::liu_nian_of(chart_id).unwrap();

        // 目标年 1990 的值年回退到 1989（己巳）
        assert_eq!(steps[0].shensha.tai_sui.year, 1989);
        assert_eq!(steps[0].shensha.tai_sui.ganzhi, gz(5, 5));
        assert_eq!(steps[0].shensha.tai_sui.zhi.zodiac(), "蛇");
        // 往后年份的立春均晚于当前时刻，同样回退
        assert_eq!(steps[1].shensha.tai_sui.year, 1990);
    });
}

#[test]
fn shen_sha_of_fixture_chart() {
    new_test_ext().execute_with(|| {
        let chart_id = create_fixture_chart(Gender::Male);
        let stars = BaziPaipan::shen_sha_of(chart_id).unwrap();

        // 日干甲系
        assert_eq!(stars.tian_yi, [DiZhi(1), DiZhi(7)]); // 丑未
        assert_eq!(stars.wen_chang, DiZhi(5)); // 巳
        assert_eq!(stars.jin_yu, DiZhi(4)); // 辰
        assert_eq!(stars.lu_shen, DiZhi(2)); // 寅
        assert_eq!(stars.yang_ren, Some(DiZhi(3))); // 卯

        // 年支午（寅午戌局）系
        assert_eq!(stars.tao_hua, DiZhi(3)); // 卯
        assert_eq!(stars.yi_ma, DiZhi(8)); // 申
        assert_eq!(stars.jiang_xing, DiZhi(6)); // 午
        assert_eq!(stars.hua_gai, DiZhi(10)); // 戌

        // 日柱甲子非魁罡日
        assert!(!stars.kui_gang);
    });
}

#[test]
fn kui_gang_detected_for_geng_chen_day() {
    // 日柱庚辰为魁罡；阴日干辛无羊刃
    let chart = chart_from([gz(6, 6), gz(3, 7), gz(6, 4), gz(2, 6)], Gender::Male, 1990);
    let stars = shensha::resolve_stars(&chart).unwrap();
    assert!(stars.kui_gang);

    let chart = chart_from([gz(6, 6), gz(3, 7), gz(7, 5), gz(2, 6)], Gender::Male, 1990);
    let stars = shensha::resolve_stars(&chart).unwrap();
    assert!(!stars.kui_gang);
    assert_eq!(stars.yang_ren, None);
}

#[test]
fn tai_sui_skips_adjustment_without_solar_terms() {
    // 适配器未声明节气能力时退化为不调整
    struct NoTermsCalendar;
    impl CalendarProvider for NoTermsCalendar {
        fn resolve(
            _input: &CalendarInput,
        ) -> Result<ResolvedBirth, pallet_paipan_common::CalendarError> {
            Err(pallet_paipan_common::CalendarError::InvalidDate)
        }
        fn year_ganzhi(year: u16) -> Option<GanZhi> {
            FixtureCalendar::year_ganzhi(year)
        }
        fn start_of_spring(_year: u16) -> Option<pallet_paipan_common::Moment> {
            None
        }
        fn year_of(now: pallet_paipan_common::Moment) -> u16 {
            FixtureCalendar::year_of(now)
        }
        fn capabilities() -> pallet_paipan_common::CalendarCapabilities {
            pallet_paipan_common::CalendarCapabilities { solar_terms: false }
        }
    }

    // 早于立春的时刻也不回退
    let before_spring = unix_time(1990, 1, 15);
    let info = shensha::tai_sui::<NoTermsCalendar>(1990, before_spring).unwrap();
    assert_eq!(info.year, 1990);
    assert_eq!(info.ganzhi, gz(6, 6));
}
