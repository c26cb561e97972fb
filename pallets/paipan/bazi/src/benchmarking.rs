//! # Bazi Paipan Pallet Benchmarking
//!
//! 排盘模块基准测试

#![cfg(feature = "runtime-benchmarks")]

use super::*;
use frame_benchmarking::v2::*;
use frame_system::RawOrigin;

use pallet_paipan_common::CalendarInput;

#[benchmarks]
mod benchmarks {
    use super::*;

    #[benchmark]
    fn create_chart() {
        let caller: T::AccountId = whitelisted_caller();
        let input = CalendarInput::Solar { year: 1990, month: 8, day: 5, hour: 12, minute: 0 };

        #[extrinsic_call]
        _(RawOrigin::Signed(caller), None, input, Gender::Male);
    }

    #[benchmark]
    fn delete_chart() {
        let caller: T::AccountId = whitelisted_caller();
        let input = CalendarInput::Solar { year: 1990, month: 8, day: 5, hour: 12, minute: 0 };
        Pallet::<T>::create_chart(
            RawOrigin::Signed(caller.clone()).into(),
            None,
            input,
            Gender::Male,
        )
        .expect("基准环境下命盘创建不应失败");
        let chart_id = NextChartId::<T>::get() - 1;

        #[extrinsic_call]
        _(RawOrigin::Signed(caller), chart_id);
    }

    impl_benchmark_test_suite!(Pallet, crate::mock::new_test_ext(), crate::mock::Test);
}
