//! Scenario parameters: convoy geometry, engineering, operations, finance
//! and the monthly river depth profile.
//!
//! Every struct derives `serde` so a whole [`Scenario`] can be read from a
//! JSON file. Values are checked once at the boundary by `validate()`; the
//! physics and cost functions downstream assume valid inputs.

use std::{fs, io::Read, path::Path};

use csv::{ReaderBuilder, Trim};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::physics::{arrangement, operating_draft, ConvoyArrangement};

/// Number of months in a depth profile.
pub const MONTHS: usize = 12;

/// Main dimensions of one hopper barge hull.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HullSpec {
    pub length_m: f64,
    pub beam_m: f64,
    /// Moulded depth (m).
    pub depth_m: f64,
    pub block_coefficient: f64,
}

impl HullSpec {
    pub fn validate(&self) -> Result<()> {
        require_positive("hull.length_m", self.length_m)?;
        require_positive("hull.beam_m", self.beam_m)?;
        require_positive("hull.depth_m", self.depth_m)?;
        require_positive("hull.block_coefficient", self.block_coefficient)?;
        if self.block_coefficient > 1.0 {
            return Err(Error::invalid(
                "hull.block_coefficient",
                format!("must not exceed 1.0, got {}", self.block_coefficient),
            ));
        }
        Ok(())
    }
}

/// Navigable channel geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChannelSpec {
    /// Tightest bend radius on the route (m).
    pub bend_radius_m: f64,
    pub width_m: f64,
}

impl ChannelSpec {
    pub fn validate(&self) -> Result<()> {
        require_positive("channel.bend_radius_m", self.bend_radius_m)?;
        require_positive("channel.width_m", self.width_m)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngineeringParams {
    /// Overall propulsive efficiency in (0, 1].
    pub propulsor_efficiency: f64,
    /// Specific fuel consumption (kg/HP/h).
    pub specific_fuel_consumption: f64,
}

impl EngineeringParams {
    pub fn validate(&self) -> Result<()> {
        require_positive(
            "engineering.propulsor_efficiency",
            self.propulsor_efficiency,
        )?;
        if self.propulsor_efficiency > 1.0 {
            return Err(Error::invalid(
                "engineering.propulsor_efficiency",
                format!("must not exceed 1.0, got {}", self.propulsor_efficiency),
            ));
        }
        require_positive(
            "engineering.specific_fuel_consumption",
            self.specific_fuel_consumption,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OperationalParams {
    /// One-way route length (km).
    pub distance_km: f64,
    /// Speed through water used when no monthly plan is given (knots).
    pub cruise_speed_knots: f64,
    pub current_speed_knots: f64,
    /// Loading rate per berth (t/h).
    pub load_rate_tph: f64,
    /// Unloading rate per berth (t/h).
    pub unload_rate_tph: f64,
    pub berths: u32,
    /// Lock passage time per round trip (min).
    pub lock_minutes: f64,
    /// Convoy assembly time per hull (min).
    pub maneuver_minutes_per_hull: f64,
    pub crew_count: u32,
}

impl OperationalParams {
    pub fn validate(&self) -> Result<()> {
        require_positive("operational.distance_km", self.distance_km)?;
        require_positive("operational.cruise_speed_knots", self.cruise_speed_knots)?;
        require_non_negative("operational.current_speed_knots", self.current_speed_knots)?;
        require_positive("operational.load_rate_tph", self.load_rate_tph)?;
        require_positive("operational.unload_rate_tph", self.unload_rate_tph)?;
        if self.berths == 0 {
            return Err(Error::invalid(
                "operational.berths",
                "at least one berth is required",
            ));
        }
        require_non_negative("operational.lock_minutes", self.lock_minutes)?;
        require_non_negative(
            "operational.maneuver_minutes_per_hull",
            self.maneuver_minutes_per_hull,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FinancialParams {
    /// Yearly interest rate (0.15 = 15 %). Zero selects straight-line depreciation.
    pub interest_rate: f64,
    pub asset_life_years: f64,
    pub fuel_price_per_litre: f64,
    /// Fuel density (kg/L).
    pub fuel_density: f64,
    /// Average monthly salary per crew member.
    pub average_salary: f64,
    /// Monthly meal allowance per crew member.
    pub meal_allowance: f64,
    /// Payroll burden on salaries (0.9 = 90 %).
    pub payroll_burden_pct: f64,
}

impl FinancialParams {
    pub fn validate(&self) -> Result<()> {
        if !self.interest_rate.is_finite() || self.interest_rate <= -1.0 {
            return Err(Error::invalid(
                "financial.interest_rate",
                format!("must be finite and greater than -1, got {}", self.interest_rate),
            ));
        }
        require_positive("financial.asset_life_years", self.asset_life_years)?;
        require_non_negative("financial.fuel_price_per_litre", self.fuel_price_per_litre)?;
        require_positive("financial.fuel_density", self.fuel_density)?;
        require_non_negative("financial.average_salary", self.average_salary)?;
        require_non_negative("financial.meal_allowance", self.meal_allowance)?;
        require_non_negative("financial.payroll_burden_pct", self.payroll_burden_pct)
    }
}

/// Everything describing one convoy and how it is run and financed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConvoyParams {
    pub hull: HullSpec,
    pub channel: ChannelSpec,
    pub engineering: EngineeringParams,
    pub operational: OperationalParams,
    pub financial: FinancialParams,
}

impl ConvoyParams {
    pub fn validate(&self) -> Result<()> {
        self.hull.validate()?;
        self.channel.validate()?;
        self.engineering.validate()?;
        self.operational.validate()?;
        self.financial.validate()
    }

    /// Convoy formation allowed by the channel.
    pub fn arrangement(&self) -> ConvoyArrangement {
        arrangement(
            self.hull.length_m,
            self.hull.beam_m,
            self.channel.bend_radius_m,
            self.channel.width_m,
        )
    }
}

/// Mean river depth (m) for each month, January first.
///
/// Always holds exactly twelve finite, positive values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct RiverDepthProfile {
    depths: [f64; MONTHS],
}

#[derive(Debug, Deserialize)]
struct DepthRecord {
    #[serde(default)]
    month: Option<u32>,
    depth_m: f64,
}

impl RiverDepthProfile {
    pub fn new(depths: [f64; MONTHS]) -> Result<Self> {
        for (index, depth) in depths.iter().enumerate() {
            if !depth.is_finite() || *depth <= 0.0 {
                return Err(Error::InvalidDepthProfile {
                    message: format!(
                        "month {} depth must be a finite positive number, got {depth}",
                        index + 1
                    ),
                });
            }
        }
        Ok(Self { depths })
    }

    /// Read a profile from CSV with a `depth_m` column and an optional
    /// `month` column (1-12). Without `month`, rows are taken in order.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);

        let mut records = Vec::with_capacity(MONTHS);
        for record in csv_reader.deserialize::<DepthRecord>() {
            records.push(record?);
        }

        let with_month = records.iter().filter(|r| r.month.is_some()).count();
        if with_month != 0 && with_month != records.len() {
            return Err(Error::InvalidDepthProfile {
                message: "either every row or no row must carry a month".to_string(),
            });
        }

        if with_month == 0 {
            return Self::try_from(records.into_iter().map(|r| r.depth_m).collect::<Vec<_>>());
        }

        let mut slots: [Option<f64>; MONTHS] = [None; MONTHS];
        for record in &records {
            let month = record.month.unwrap_or_default();
            if !(1..=MONTHS as u32).contains(&month) {
                return Err(Error::InvalidDepthProfile {
                    message: format!("month must be between 1 and 12, got {month}"),
                });
            }
            let slot = &mut slots[month as usize - 1];
            if slot.is_some() {
                return Err(Error::InvalidDepthProfile {
                    message: format!("month {month} appears more than once"),
                });
            }
            *slot = Some(record.depth_m);
        }

        let depths = slots
            .iter()
            .enumerate()
            .map(|(index, slot)| {
                slot.ok_or_else(|| Error::InvalidDepthProfile {
                    message: format!("month {} is missing", index + 1),
                })
            })
            .collect::<Result<Vec<f64>>>()?;
        Self::try_from(depths)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let file = fs::File::open(path)?;
        Self::from_csv_reader(file)
    }

    pub fn depths(&self) -> &[f64; MONTHS] {
        &self.depths
    }

    /// Depth of a month, 1-based.
    pub fn month(&self, month: usize) -> Option<f64> {
        month
            .checked_sub(1)
            .and_then(|index| self.depths.get(index).copied())
    }

    pub fn max_depth(&self) -> f64 {
        self.depths.iter().copied().fold(f64::MIN, f64::max)
    }

    pub fn min_depth(&self) -> f64 {
        self.depths.iter().copied().fold(f64::MAX, f64::min)
    }
}

impl TryFrom<Vec<f64>> for RiverDepthProfile {
    type Error = Error;

    fn try_from(depths: Vec<f64>) -> Result<Self> {
        let count = depths.len();
        let depths: [f64; MONTHS] = depths.try_into().map_err(|_| Error::InvalidDepthProfile {
            message: format!("expected {MONTHS} monthly depths, got {count}"),
        })?;
        Self::new(depths)
    }
}

impl From<RiverDepthProfile> for Vec<f64> {
    fn from(profile: RiverDepthProfile) -> Self {
        profile.depths.to_vec()
    }
}

/// Full input of a simulation or optimisation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub params: ConvoyParams,
    pub depth_profile: RiverDepthProfile,
    /// Structural (design) draft ceiling of the hulls (m).
    pub structural_draft_m: f64,
    /// Under-keel safety margin (m).
    pub keel_clearance_m: f64,
    /// Operating days per year, spread evenly over the twelve months.
    pub available_days: f64,
}

impl Scenario {
    pub fn validate(&self) -> Result<()> {
        self.params.validate()?;
        require_positive("structural_draft_m", self.structural_draft_m)?;
        require_non_negative("keel_clearance_m", self.keel_clearance_m)?;
        require_positive("available_days", self.available_days)?;
        if self.available_days > 366.0 {
            return Err(Error::invalid(
                "available_days",
                format!("a year has at most 366 days, got {}", self.available_days),
            ));
        }
        Ok(())
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let scenario: Scenario = serde_json::from_str(json)?;
        scenario.validate()?;
        Ok(scenario)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Operating days in each month.
    pub fn days_per_month(&self) -> f64 {
        self.available_days / MONTHS as f64
    }

    /// Draft of the deepest month, used to size the engine.
    pub fn worst_case_draft(&self) -> f64 {
        operating_draft(
            self.depth_profile.max_depth(),
            self.keel_clearance_m,
            self.structural_draft_m,
        )
    }

    /// Loading draft of a month (1-based).
    pub fn month_draft(&self, month: usize) -> Option<f64> {
        self.depth_profile
            .month(month)
            .map(|depth| operating_draft(depth, self.keel_clearance_m, self.structural_draft_m))
    }

    /// Amazon soybean convoy: 2 x 3 hopper barges over 1000 km.
    pub fn reference() -> Self {
        Self {
            params: ConvoyParams {
                hull: HullSpec {
                    length_m: 60.96,
                    beam_m: 10.67,
                    depth_m: 4.27,
                    block_coefficient: 0.9,
                },
                channel: ChannelSpec {
                    bend_radius_m: 800.0,
                    width_m: 100.0,
                },
                engineering: EngineeringParams {
                    propulsor_efficiency: 0.5,
                    specific_fuel_consumption: 0.16,
                },
                operational: OperationalParams {
                    distance_km: 1000.0,
                    cruise_speed_knots: 6.0,
                    current_speed_knots: 2.0,
                    load_rate_tph: 2000.0,
                    unload_rate_tph: 1000.0,
                    berths: 2,
                    lock_minutes: 0.0,
                    maneuver_minutes_per_hull: 20.0,
                    crew_count: 8,
                },
                financial: FinancialParams {
                    interest_rate: 0.15,
                    asset_life_years: 20.0,
                    fuel_price_per_litre: 4.5,
                    fuel_density: 0.85,
                    average_salary: 5000.0,
                    meal_allowance: 800.0,
                    payroll_burden_pct: 0.9,
                },
            },
            depth_profile: RiverDepthProfile {
                depths: [
                    7.72, 9.87, 10.86, 10.98, 8.43, 6.35, 5.12, 3.89, 3.30, 3.00, 3.65, 5.23,
                ],
            },
            structural_draft_m: 3.66,
            keel_clearance_m: 0.5,
            available_days: 330.0,
        }
    }
}

fn require_positive(field: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(Error::invalid(
            field,
            format!("must be a finite positive number, got {value}"),
        ));
    }
    Ok(())
}

fn require_non_negative(field: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(Error::invalid(
            field,
            format!("must be finite and non-negative, got {value}"),
        ));
    }
    Ok(())
}
