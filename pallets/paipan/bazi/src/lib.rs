//! # 四柱排盘 Pallet (Pallet Bazi Paipan)
//!
//! ## 概述
//!
//! 本 Pallet 实现四柱八字排盘引擎，包括：
//! - 命盘构建（时辰窗口校验、藏干提取、纳音标注）
//! - 五行强度分析（藏干权重 + 月令季节增强 + 特殊格局）
//! - 十神关系计算（干对干查表、支按补气规则给出列表）
//! - 大运推算（日干阴阳 × 性别定顺逆，十步十年）
//! - 流年推算（逐年干支 + 太岁/岁破/天乙）
//! - 神煞查询（文昌、桃花、驿马、将星、华盖、金舆、禄神、羊刃、魁罡）
//!
//! ## 技术特性
//!
//! - ✅ **辰藏干正确性**: 使用"戊乙癸"（主流派）
//! - ✅ **查表集中声明**: 全部固定表为静态常量，接入时一致性校验
//! - ✅ **精简存储**: 只存四柱索引，派生结果实时计算不落盘
//! - ✅ **历法解耦**: 公农历换算与节气时刻由 `CalendarProvider` 适配器
//!   提供，能力以显式声明一次性校验
//!
//! ## 使用示例
//!
//! ```ignore
//! // 公历输入创建命盘
//! BaziPaipan::create_chart(
//!     origin,
//!     None,
//!     CalendarInput::Solar { year: 1990, month: 8, day: 5, hour: 12, minute: 0 },
//!     Gender::Male,
//! )?;
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

pub use pallet::*;

pub mod weights;
pub use weights::WeightInfo;

pub mod calculations;
pub mod constants;
pub mod shensha;
pub mod types;

#[cfg(test)]
mod mock;

#[cfg(test)]
mod tests;

#[cfg(feature = "runtime-benchmarks")]
mod benchmarking;

// 重新导出核心类型，方便外部使用
pub use types::{
    Chart, ChartError, ChartInfo, DaYunStep, ElementScore, Gender, LiuNianStep, ShenShaResult,
    ShiShen, ShiShenRelations, SiZhuIndex,
};

#[frame_support::pallet]
pub mod pallet {
    use frame_support::pallet_prelude::*;
    use frame_system::pallet_prelude::*;
    use sp_runtime::SaturatedConversion;

    use pallet_paipan_common::{CalendarError, CalendarInput, CalendarProvider, Moment};

    use crate::calculations::{self, ProjectionVec};
    use crate::types::*;
    use crate::weights::WeightInfo;

    /// Pallet 配置 Trait
    #[pallet::config]
    pub trait Config:
        frame_system::Config<RuntimeEvent: From<Event<Self>>> + pallet_timestamp::Config
    {
        /// 权重信息
        type WeightInfo: WeightInfo;

        /// 每个账户最多创建的命盘数量
        #[pallet::constant]
        type MaxChartsPerAccount: Get<u32>;

        /// 历法适配器：公农历解析、年干支、立春时刻
        type Calendar: CalendarProvider;
    }

    #[pallet::pallet]
    pub struct Pallet<T>(_);

    /// 下一个命盘ID计数器
    #[pallet::storage]
    #[pallet::getter(fn next_chart_id)]
    pub type NextChartId<T: Config> = StorageValue<_, u64, ValueQuery>;

    /// 存储映射: 命盘ID -> 命盘信息（精简结构）
    #[pallet::storage]
    #[pallet::getter(fn chart_by_id)]
    pub type ChartById<T: Config> = StorageMap<
        _,
        Blake2_128Concat,
        u64,
        ChartInfo<T::AccountId, BlockNumberFor<T>>,
    >;

    /// 存储映射: 用户 -> 命盘ID列表
    #[pallet::storage]
    #[pallet::getter(fn user_charts)]
    pub type UserCharts<T: Config> = StorageMap<
        _,
        Blake2_128Concat,
        T::AccountId,
        BoundedVec<u64, T::MaxChartsPerAccount>,
        ValueQuery,
    >;

    /// Pallet 事件
    #[pallet::event]
    #[pallet::generate_deposit(pub(super) fn deposit_event)]
    pub enum Event<T: Config> {
        /// 命盘创建成功 [所有者, 命盘ID, 出生时间]
        ChartCreated {
            owner: T::AccountId,
            chart_id: u64,
            birth_time: BirthTime,
        },
        /// 命盘删除 [所有者, 命盘ID]
        ChartDeleted {
            owner: T::AccountId,
            chart_id: u64,
        },
    }

    /// Pallet 错误
    #[pallet::error]
    pub enum Error<T> {
        /// 输入参数无效
        InvalidInput,
        /// 日期不存在或无法解析
        InvalidDate,
        /// 该农历年月无闰月
        LeapMonthNotFound,
        /// 计算时辰与适配器时支不一致（适配器配置冲突）
        HourBranchMismatch,
        /// 干支索引查表落空（程序缺陷信号）
        UnknownBranchOrStem,
        /// 命盘数量过多
        TooManyCharts,
        /// 命盘未找到
        ChartNotFound,
        /// 非命盘所有者
        NotChartOwner,
        /// 命盘ID已达到最大值
        ChartIdOverflow,
    }

    #[pallet::hooks]
    impl<T: Config> Hooks<BlockNumberFor<T>> for Pallet<T> {
        /// 接入时一致性校验
        ///
        /// - 固定查表结构校验（藏干唯一主气、十神逐行双射等）
        /// - 历法适配器能力声明校验：声明节气能力则立春必须可查
        fn integrity_test() {
            if let Err(reason) = crate::constants::consistency_check() {
                panic!("排盘查表一致性校验失败: {}", reason);
            }
            let caps = T::Calendar::capabilities();
            if caps.solar_terms {
                assert!(
                    T::Calendar::start_of_spring(2000).is_some(),
                    "历法适配器声明节气能力但立春不可查"
                );
            }
        }
    }

    /// Pallet 可调用函数
    #[pallet::call]
    impl<T: Config> Pallet<T> {
        /// 创建命盘
        ///
        /// # 功能
        ///
        /// 支持两种输入方式：
        /// - **公历日期** (`CalendarInput::Solar`)
        /// - **农历日期** (`CalendarInput::Lunar`): 需标明是否闰月
        ///
        /// # 处理流程
        ///
        /// 1. 验证输入参数范围
        /// 2. 历法适配器解析为四柱干支
        /// 3. 时辰窗口校验（子时 23:00-01:00 跨午夜）
        /// 4. 装柱（藏干、十神、纳音）确认命盘可构建
        /// 5. 存储精简命盘信息
        ///
        /// 大运、流年、五行强度、神煞均不存储，查询时实时计算。
        ///
        /// # 参数
        ///
        /// - `origin`: 交易发起者
        /// - `name`: 命盘名称（可选，最大32字节UTF-8）
        /// - `input`: 公历或农历出生时间
        /// - `gender`: 性别（用于大运顺逆）
        #[pallet::call_index(0)]
        #[pallet::weight(<T as Config>::WeightInfo::create_chart())]
        pub fn create_chart(
            origin: OriginFor<T>,
            name: Option<BoundedVec<u8, ConstU32<32>>>,
            input: CalendarInput,
            gender: Gender,
        ) -> DispatchResult {
            let who = ensure_signed(origin)?;

            ensure!(input.is_valid(), Error::<T>::InvalidInput);

            let existing_charts = UserCharts::<T>::get(&who);
            ensure!(
                existing_charts.len() < T::MaxChartsPerAccount::get() as usize,
                Error::<T>::TooManyCharts
            );

            // 历法解析 + 命盘构建（构建失败不落任何存储）
            let resolved = T::Calendar::resolve(&input).map_err(|e| match e {
                CalendarError::InvalidDate => Error::<T>::InvalidDate,
                CalendarError::LeapMonthNotFound => Error::<T>::LeapMonthNotFound,
            })?;
            let chart = calculations::build_chart(&resolved, gender)
                .map_err(Self::map_chart_error)?;

            let chart_id = NextChartId::<T>::get();
            ensure!(chart_id < u64::MAX, Error::<T>::ChartIdOverflow);

            let info = ChartInfo {
                owner: who.clone(),
                name: name.unwrap_or_default(),
                birth_time: chart.birth_time,
                gender,
                sizhu_index: SiZhuIndex::from_pillars(&resolved.pillars),
                created_at: frame_system::Pallet::<T>::block_number(),
            };

            ChartById::<T>::insert(chart_id, info);

            UserCharts::<T>::try_mutate(&who, |charts| {
                charts.try_push(chart_id).map_err(|_| Error::<T>::TooManyCharts)
            })?;

            NextChartId::<T>::put(chart_id + 1);

            log::debug!(
                target: "bazi-paipan",
                "命盘 {} 创建: {}-{}-{} {}时",
                chart_id,
                chart.birth_time.year,
                chart.birth_time.month,
                chart.birth_time.day,
                chart.birth_time.hour,
            );

            Self::deposit_event(Event::ChartCreated {
                owner: who,
                chart_id,
                birth_time: chart.birth_time,
            });

            Ok(())
        }

        /// 删除命盘
        ///
        /// # 权限
        ///
        /// 只有命盘所有者可以删除自己的命盘
        #[pallet::call_index(1)]
        #[pallet::weight(<T as Config>::WeightInfo::delete_chart())]
        pub fn delete_chart(origin: OriginFor<T>, chart_id: u64) -> DispatchResult {
            let who = ensure_signed(origin)?;

            let info = ChartById::<T>::get(chart_id).ok_or(Error::<T>::ChartNotFound)?;
            ensure!(info.owner == who, Error::<T>::NotChartOwner);

            ChartById::<T>::remove(chart_id);

            UserCharts::<T>::mutate(&who, |charts| {
                if let Some(pos) = charts.iter().position(|&id| id == chart_id) {
                    charts.remove(pos);
                }
            });

            Self::deposit_event(Event::ChartDeleted { owner: who, chart_id });

            Ok(())
        }
    }

    // 查询接口（实时计算，不消耗 gas，不上链）
    impl<T: Config> Pallet<T> {
        /// 错误映射：纯计算层错误 -> Pallet 错误
        fn map_chart_error(e: ChartError) -> Error<T> {
            match e {
                ChartError::InvalidDate => Error::<T>::InvalidDate,
                ChartError::HourBranchMismatch { .. } => Error::<T>::HourBranchMismatch,
                ChartError::LeapMonthNotFound { .. } => Error::<T>::LeapMonthNotFound,
                ChartError::UnknownBranchOrStem => Error::<T>::UnknownBranchOrStem,
            }
        }

        /// 当前链上时间（Unix 秒）
        fn now_seconds() -> Moment {
            let now_ms: u64 = pallet_timestamp::Pallet::<T>::get().saturated_into();
            now_ms / 1000
        }

        /// 从存储重建完整命盘
        pub fn chart_of(chart_id: u64) -> Option<Chart> {
            let info = ChartById::<T>::get(chart_id)?;
            calculations::chart_from_index(&info.sizhu_index, info.gender, info.birth_time).ok()
        }

        /// 五行强度
        pub fn element_strength_of(chart_id: u64) -> Option<ElementScore> {
            Some(calculations::element_strength(&Self::chart_of(chart_id)?))
        }

        /// 十神关系
        pub fn ten_gods_of(chart_id: u64) -> Option<ShiShenRelations> {
            calculations::ten_gods(&Self::chart_of(chart_id)?).ok()
        }

        /// 十步大运
        pub fn da_yun_of(chart_id: u64) -> Option<ProjectionVec<DaYunStep>> {
            let chart = Self::chart_of(chart_id)?;
            let current_year = T::Calendar::year_of(Self::now_seconds());
            calculations::project_da_yun(&chart, current_year).ok()
        }

        /// 十步流年
        pub fn liu_nian_of(chart_id: u64) -> Option<ProjectionVec<LiuNianStep>> {
            let chart = Self::chart_of(chart_id)?;
            calculations::project_liu_nian::<T::Calendar>(&chart, Self::now_seconds()).ok()
        }

        /// 命盘神煞
        pub fn shen_sha_of(chart_id: u64) -> Option<ShenShaResult> {
            crate::shensha::resolve_stars(&Self::chart_of(chart_id)?).ok()
        }
    }
}
