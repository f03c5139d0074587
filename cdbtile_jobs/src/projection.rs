// Copyright 2026 the Cdbtile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geodetic to local Cartesian projection.

/// WGS-84 ellipsoid constants.
pub mod wgs84 {
    /// Semi-major axis (equatorial radius) in meters.
    pub const A: f64 = 6_378_137.0;

    /// Flattening (1 / 298.257223563).
    pub const F: f64 = 1.0 / 298.257_223_563;

    /// First eccentricity squared.
    pub const E2: f64 = F * (2.0 - F);

    /// Semi-minor axis (polar radius) in meters.
    pub const B: f64 = A * (1.0 - F);

    /// Second eccentricity squared.
    pub const E2P: f64 = (A * A - B * B) / (B * B);
}

/// Maps geodetic coordinates to the local frame the inputs are expressed in,
/// and back.
pub trait LocalProjector {
    /// `(lat, lon, alt)` in degrees and meters to local `(x, y, z)`.
    fn geodetic_to_local(&self, lat: f64, lon: f64, alt: f64) -> (f64, f64, f64);

    /// Local `(x, y, z)` to `(lat, lon, alt)`.
    fn local_to_geodetic(&self, x: f64, y: f64, z: f64) -> (f64, f64, f64);
}

impl<P: LocalProjector + ?Sized> LocalProjector for &P {
    fn geodetic_to_local(&self, lat: f64, lon: f64, alt: f64) -> (f64, f64, f64) {
        (**self).geodetic_to_local(lat, lon, alt)
    }

    fn local_to_geodetic(&self, x: f64, y: f64, z: f64) -> (f64, f64, f64) {
        (**self).local_to_geodetic(x, y, z)
    }
}

/// Geodetic position to Earth-centred, Earth-fixed meters.
#[inline]
pub fn geodetic_to_ecef(lat_deg: f64, lon_deg: f64, h_m: f64) -> [f64; 3] {
    let (sin_lat, cos_lat) = lat_deg.to_radians().sin_cos();
    let (sin_lon, cos_lon) = lon_deg.to_radians().sin_cos();

    // Radius of curvature in the prime vertical.
    let n = wgs84::A / (1.0 - wgs84::E2 * sin_lat * sin_lat).sqrt();

    [
        (n + h_m) * cos_lat * cos_lon,
        (n + h_m) * cos_lat * sin_lon,
        (n * (1.0 - wgs84::E2) + h_m) * sin_lat,
    ]
}

/// Earth-centred, Earth-fixed meters to `(lat, lon, h)`, using Bowring's
/// closed form.
#[inline]
pub fn ecef_to_geodetic(x: f64, y: f64, z: f64) -> (f64, f64, f64) {
    let p = x.hypot(y);
    let lon = y.atan2(x);

    let theta = (z * wgs84::A).atan2(p * wgs84::B);
    let (sin_theta, cos_theta) = theta.sin_cos();
    let lat = (z + wgs84::E2P * wgs84::B * sin_theta.powi(3))
        .atan2(p - wgs84::E2 * wgs84::A * cos_theta.powi(3));

    let (sin_lat, cos_lat) = lat.sin_cos();
    let n = wgs84::A / (1.0 - wgs84::E2 * sin_lat * sin_lat).sqrt();
    let h = if cos_lat.abs() > 1e-12 {
        p / cos_lat - n
    } else {
        z.abs() - wgs84::B
    };

    (lat.to_degrees(), lon.to_degrees(), h)
}

/// East-North-Up tangent plane on the WGS-84 ellipsoid.
///
/// Local X points east, Y north and Z up, in meters, with the origin on the
/// ellipsoid (or at the given height) below the reference position.
#[derive(Clone, Debug, PartialEq)]
pub struct EllipsoidTangentPlane {
    origin_lat: f64,
    origin_lon: f64,
    origin_ecef: [f64; 3],
    sin_lat: f64,
    cos_lat: f64,
    sin_lon: f64,
    cos_lon: f64,
}

impl EllipsoidTangentPlane {
    /// A plane tangent at `(lat, lon)` degrees, on the ellipsoid surface.
    pub fn new(lat: f64, lon: f64) -> Self {
        Self::with_height(lat, lon, 0.0)
    }

    /// A plane tangent at `(lat, lon)` degrees, raised to `height` meters.
    pub fn with_height(lat: f64, lon: f64, height: f64) -> Self {
        let (sin_lat, cos_lat) = lat.to_radians().sin_cos();
        let (sin_lon, cos_lon) = lon.to_radians().sin_cos();
        Self {
            origin_lat: lat,
            origin_lon: lon,
            origin_ecef: geodetic_to_ecef(lat, lon, height),
            sin_lat,
            cos_lat,
            sin_lon,
            cos_lon,
        }
    }

    /// Reference latitude in degrees.
    pub fn origin_lat(&self) -> f64 {
        self.origin_lat
    }

    /// Reference longitude in degrees.
    pub fn origin_lon(&self) -> f64 {
        self.origin_lon
    }
}

impl LocalProjector for EllipsoidTangentPlane {
    fn geodetic_to_local(&self, lat: f64, lon: f64, alt: f64) -> (f64, f64, f64) {
        let [x, y, z] = geodetic_to_ecef(lat, lon, alt);
        let [ox, oy, oz] = self.origin_ecef;
        let (dx, dy, dz) = (x - ox, y - oy, z - oz);
        let east = -self.sin_lon * dx + self.cos_lon * dy;
        let north = -self.sin_lat * self.cos_lon * dx - self.sin_lat * self.sin_lon * dy
            + self.cos_lat * dz;
        let up = self.cos_lat * self.cos_lon * dx
            + self.cos_lat * self.sin_lon * dy
            + self.sin_lat * dz;
        (east, north, up)
    }

    fn local_to_geodetic(&self, x: f64, y: f64, z: f64) -> (f64, f64, f64) {
        let (e, n, u) = (x, y, z);
        let dx = -self.sin_lon * e - self.sin_lat * self.cos_lon * n
            + self.cos_lat * self.cos_lon * u;
        let dy = self.cos_lon * e - self.sin_lat * self.sin_lon * n
            + self.cos_lat * self.sin_lon * u;
        let dz = self.cos_lat * n + self.sin_lat * u;
        let [ox, oy, oz] = self.origin_ecef;
        ecef_to_geodetic(ox + dx, oy + dy, oz + dz)
    }
}

/// Treats local coordinates as degrees: X is longitude, Y latitude, Z altitude.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct IdentityProjector;

impl LocalProjector for IdentityProjector {
    fn geodetic_to_local(&self, lat: f64, lon: f64, alt: f64) -> (f64, f64, f64) {
        (lon, lat, alt)
    }

    fn local_to_geodetic(&self, x: f64, y: f64, z: f64) -> (f64, f64, f64) {
        (y, x, z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() <= tol
    }

    #[test]
    fn ecef_of_equator_and_pole() {
        let [x, y, z] = geodetic_to_ecef(0.0, 0.0, 0.0);
        assert!(close(x, wgs84::A, 1e-6) && close(y, 0.0, 1e-6) && close(z, 0.0, 1e-6));
        let [x, _, z] = geodetic_to_ecef(90.0, 0.0, 0.0);
        assert!(close(x, 0.0, 1e-6), "x = {x}");
        assert!(close(z, wgs84::B, 1e-6), "z = {z}");
    }

    #[test]
    fn ecef_round_trip() {
        for (lat, lon, h) in [(45.0, 7.0, 250.0), (-33.9, 151.2, 0.0), (89.5, -120.0, 10.0)] {
            let [x, y, z] = geodetic_to_ecef(lat, lon, h);
            let (lat2, lon2, h2) = ecef_to_geodetic(x, y, z);
            assert!(close(lat, lat2, 1e-8), "{lat} vs {lat2}");
            assert!(close(lon, lon2, 1e-8), "{lon} vs {lon2}");
            assert!(close(h, h2, 1e-3), "{h} vs {h2}");
        }
    }

    #[test]
    fn origin_is_zero_and_axes_point_east_north() {
        let ltp = EllipsoidTangentPlane::new(45.0, 7.0);
        let (x, y, z) = ltp.geodetic_to_local(45.0, 7.0, 0.0);
        assert!(close(x, 0.0, 1e-6) && close(y, 0.0, 1e-6) && close(z, 0.0, 1e-6));

        let (x, y, _) = ltp.geodetic_to_local(45.01, 7.0, 0.0);
        assert!(close(x, 0.0, 1e-6), "due north has no easting: {x}");
        assert!(y > 1000.0 && y < 1200.0, "0.01 deg of latitude is about 1.1 km: {y}");

        let (x, y, _) = ltp.geodetic_to_local(45.0, 7.01, 0.0);
        assert!(x > 700.0 && x < 900.0, "0.01 deg of longitude at 45N is about 790 m: {x}");
        assert!(y.abs() < 1.0, "due east stays near the north axis: {y}");
    }

    #[test]
    fn tangent_plane_round_trip() {
        let ltp = EllipsoidTangentPlane::with_height(-12.5, 130.8, 40.0);
        for (x, y, z) in [(0.0, 0.0, 0.0), (2500.0, -4000.0, 12.0), (-10_000.0, 8000.0, -30.0)] {
            let (lat, lon, alt) = ltp.local_to_geodetic(x, y, z);
            let (x2, y2, z2) = ltp.geodetic_to_local(lat, lon, alt);
            assert!(close(x, x2, 1e-3) && close(y, y2, 1e-3) && close(z, z2, 1e-3));
        }
    }

    #[test]
    fn identity_swaps_axes() {
        let p = IdentityProjector;
        assert_eq!(p.geodetic_to_local(10.0, 20.0, 5.0), (20.0, 10.0, 5.0));
        assert_eq!(p.local_to_geodetic(20.0, 10.0, 5.0), (10.0, 20.0, 5.0));
        let by_ref: &dyn LocalProjector = &p;
        assert_eq!(by_ref.local_to_geodetic(1.0, 2.0, 3.0), (2.0, 1.0, 3.0));
    }
}
