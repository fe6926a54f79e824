// pv-core/src/units.rs

use uom::si::f64::{
    Area as UomArea, Energy as UomEnergy, HeatFluxDensity as UomHeatFluxDensity,
    Power as UomPower, Time as UomTime,
};

// Public canonical unit types (SI, f64)
pub type Area = UomArea;
pub type Energy = UomEnergy;
/// Radiant flux per unit area (W/m²).
pub type Irradiance = UomHeatFluxDensity;
pub type Power = UomPower;
pub type Time = UomTime;

#[inline]
pub fn m2(v: f64) -> Area {
    use uom::si::area::square_meter;
    Area::new::<square_meter>(v)
}

#[inline]
pub fn w(v: f64) -> Power {
    use uom::si::power::watt;
    Power::new::<watt>(v)
}

#[inline]
pub fn w_per_m2(v: f64) -> Irradiance {
    use uom::si::heat_flux_density::watt_per_square_meter;
    Irradiance::new::<watt_per_square_meter>(v)
}

#[inline]
pub fn kwh(v: f64) -> Energy {
    use uom::si::energy::kilowatt_hour;
    Energy::new::<kilowatt_hour>(v)
}

#[inline]
pub fn hours(v: f64) -> Time {
    use uom::si::time::hour;
    Time::new::<hour>(v)
}

#[inline]
pub fn to_watts(p: Power) -> f64 {
    use uom::si::power::watt;
    p.get::<watt>()
}

#[inline]
pub fn to_kwh(e: Energy) -> f64 {
    use uom::si::energy::kilowatt_hour;
    e.get::<kilowatt_hour>()
}

#[inline]
pub fn to_w_per_m2(g: Irradiance) -> f64 {
    use uom::si::heat_flux_density::watt_per_square_meter;
    g.get::<watt_per_square_meter>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_smoke() {
        let _a = m2(10.0);
        let _p = w(250.0);
        let _g = w_per_m2(1000.0);
        let _e = kwh(1.5);
        let _t = hours(0.5);
    }

    #[test]
    fn irradiance_times_area_is_power() {
        let p: Power = w_per_m2(1000.0) * m2(2.0);
        assert!((to_watts(p) - 2000.0).abs() < 1e-9);
    }

    #[test]
    fn power_times_time_is_energy() {
        let e: Energy = w(1000.0) * hours(0.5);
        assert!((to_kwh(e) - 0.5).abs() < 1e-12);
    }
}
