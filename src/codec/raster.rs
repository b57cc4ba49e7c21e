//! PALM static driver raster: grid <-> netCDF
//!
//! File rows run south to north, so row 0 of the painted grid lands on the
//! last `y` index of the file. Integer channels are stored as int8 with fill
//! `-127`; heights as float32 with fill `-9999.0`.

use std::io;
use std::path::Path;

use crate::core::config::DriverInfo;
use crate::core::error::Error;
use crate::core::types::{CellCoord, Origin, Result};
use crate::grid::{DisplayColor, Grid, Pixel, PixelMap};
use super::netcdf::{Dataset, NcValues};

/// Fill value of int8 channels
pub const FILL_BYTE: i8 = -127;
/// Fill value of float32 channels
pub const FILL_FLOAT: f32 = -9999.0;

/// An int8 land-use channel and the pixel field it carries
struct ByteChannel {
    name: &'static str,
    long_name: &'static str,
    lod: bool,
    get: fn(&Pixel) -> i32,
}

const SURFACE_CHANNELS: [ByteChannel; 4] = [
    ByteChannel {
        name: "vegetation_type",
        long_name: "vegetation type classification",
        lod: false,
        get: |p| p.vegetation_type,
    },
    ByteChannel {
        name: "soil_type",
        long_name: "soil type classification",
        lod: true,
        get: |p| p.soil_type,
    },
    ByteChannel {
        name: "pavement_type",
        long_name: "pavement type classification",
        lod: false,
        get: |p| p.pavement_type,
    },
    ByteChannel {
        name: "water_type",
        long_name: "water type classification",
        lod: false,
        get: |p| p.water_type,
    },
];

const BUILDING_ID: ByteChannel = ByteChannel {
    name: "building_id",
    long_name: "building ID",
    lod: false,
    get: |p| p.building_id,
};

const BUILDING_TYPE: ByteChannel = ByteChannel {
    name: "building_type",
    long_name: "building type classification",
    lod: false,
    get: |p| p.building_type,
};

const BUILDING_HEIGHT: &str = "buildings_2d";

/// Largest grid a raster may declare (8192 x 8192)
pub const MAX_CELLS: usize = 1 << 26;

/// Every channel a decoder looks for, in file order
pub const CHANNEL_NAMES: [&str; 7] = [
    "vegetation_type",
    "soil_type",
    "pavement_type",
    "water_type",
    "building_id",
    BUILDING_HEIGHT,
    "building_type",
];

/// Result of reading a raster
#[derive(Debug, Clone)]
pub struct DecodedRaster {
    pub grid: Grid,
    pub driver: DriverInfo,
    /// Channels absent from the file, substituted with `-127`
    pub missing_channels: Vec<&'static str>,
}

/// Encode a grid as a netCDF static driver
pub fn encode(grid: &Grid, driver: &DriverInfo) -> Result<Vec<u8>> {
    let (nx, ny) = (grid.nx(), grid.ny());
    if nx == 0 || ny == 0 {
        return Err(Error::InvalidDimensions { nx, ny, res: grid.res() });
    }

    let mut skipped = 0usize;
    let cells: Vec<(usize, CellCoord, &Pixel)> = grid
        .iter()
        .filter_map(|(coord, pixel)| {
            if grid.in_extent(coord) {
                // flip: row 0 is the northernmost file row
                let index = (ny - 1 - coord.row) * nx + coord.col;
                Some((index, coord, pixel))
            } else {
                skipped += 1;
                None
            }
        })
        .collect();
    if skipped > 0 {
        log::warn!("Skipping {} cells outside the {}x{} extent", skipped, nx, ny);
    }

    let mut ds = Dataset::new();
    ds.add_dimension("x", nx);
    ds.add_dimension("y", ny);

    ds.add_variable("zt", &["y", "x"], NcValues::Float(vec![0.0; nx * ny]))?
        .set_attribute("_FillValue", NcValues::Float(vec![FILL_FLOAT]))
        .set_attribute("long_name", NcValues::text("terrain height"))
        .set_attribute("units", NcValues::text("m"));

    for channel in &SURFACE_CHANNELS {
        add_byte_channel(&mut ds, channel, &cells, nx * ny)?;
    }

    let res = grid.res();
    let axis = |n: usize| (0..n).map(|i| (i as f64 * res + 0.5 * res) as f32).collect::<Vec<f32>>();
    ds.add_variable("x", &["x"], NcValues::Float(axis(nx)))?
        .set_attribute("long_name", NcValues::text("distance to origin in x-direction"))
        .set_attribute("units", NcValues::text("m"))
        .set_attribute("axis", NcValues::text("X"));
    ds.add_variable("y", &["y"], NcValues::Float(axis(ny)))?
        .set_attribute("long_name", NcValues::text("distance to origin in y-direction"))
        .set_attribute("units", NcValues::text("m"))
        .set_attribute("axis", NcValues::text("Y"));

    if cells.iter().any(|(_, _, p)| p.building_id > -1) {
        log::info!("Buildings detected, enable the urban surface model in PALM");
        add_byte_channel(&mut ds, &BUILDING_ID, &cells, nx * ny)?;

        let mut heights = vec![FILL_FLOAT; nx * ny];
        for &(index, _, pixel) in &cells {
            if pixel.building_height > -1.0 {
                heights[index] = pixel.building_height as f32;
            }
        }
        ds.add_variable(BUILDING_HEIGHT, &["y", "x"], NcValues::Float(heights))?
            .set_attribute("_FillValue", NcValues::Float(vec![FILL_FLOAT]))
            .set_attribute("long_name", NcValues::text("building height"))
            .set_attribute("units", NcValues::text("m"))
            .set_attribute("lod", NcValues::Int(vec![1]));

        add_byte_channel(&mut ds, &BUILDING_TYPE, &cells, nx * ny)?;
    }

    let origin = grid.origin();
    ds.set_attribute("title", NcValues::text(&driver.title))
        .set_attribute("author", NcValues::text(&driver.author))
        .set_attribute("origin_lat", NcValues::Double(vec![origin.latitude]))
        .set_attribute("origin_lon", NcValues::Double(vec![origin.longitude]))
        .set_attribute("origin_x", NcValues::Double(vec![origin.x]))
        .set_attribute("origin_y", NcValues::Double(vec![origin.y]))
        .set_attribute("origin_z", NcValues::Double(vec![0.0]))
        .set_attribute("rotation_angle", NcValues::Double(vec![origin.rotation_angle]));

    Ok(ds.to_bytes()?)
}

fn add_byte_channel(
    ds: &mut Dataset,
    channel: &ByteChannel,
    cells: &[(usize, CellCoord, &Pixel)],
    len: usize,
) -> Result<()> {
    let mut values = vec![FILL_BYTE; len];
    for &(index, coord, pixel) in cells {
        let value = (channel.get)(pixel);
        if value > -1 {
            values[index] = i8::try_from(value).map_err(|_| Error::ChannelOverflow {
                channel: channel.name,
                row: coord.row,
                col: coord.col,
                value,
            })?;
        }
    }

    let var = ds
        .add_variable(channel.name, &["y", "x"], NcValues::Byte(values))?
        .set_attribute("_FillValue", NcValues::Byte(vec![FILL_BYTE]))
        .set_attribute("long_name", NcValues::text(channel.long_name))
        .set_attribute("units", NcValues::text("1"));
    if channel.lod {
        var.set_attribute("lod", NcValues::Int(vec![1]));
    }
    Ok(())
}

/// Decode a netCDF static driver into a grid
pub fn decode(bytes: &[u8]) -> Result<DecodedRaster> {
    let ds = Dataset::from_bytes(bytes)?;

    let dim_len = |name: &str| {
        ds.dimension(name)
            .map(|d| d.len)
            .ok_or_else(|| invalid_raster(format!("Missing dimension '{}'", name)))
    };
    let nx = dim_len("x")?;
    let ny = dim_len("y")?;

    let res = if nx > 1 {
        match ds.variable("x").map(|x| (x.values.get_f64(0), x.values.get_f64(1))) {
            Some((Some(x0), Some(x1))) => x1 - x0,
            _ => {
                log::warn!("No usable x coordinate, assuming resolution 1");
                1.0
            }
        }
    } else {
        1.0
    };
    if nx == 0 || ny == 0 || !(res > 0.0) {
        return Err(Error::InvalidDimensions { nx, ny, res });
    }

    let cells = nx
        .checked_mul(ny)
        .filter(|&cells| cells <= MAX_CELLS)
        .ok_or_else(|| invalid_raster(format!("Grid of {}x{} cells is too large", nx, ny)))?;
    // Without any channel data the extent is only backed by the header
    if CHANNEL_NAMES.iter().all(|name| ds.variable(name).is_none()) && cells > bytes.len() {
        return Err(invalid_raster(format!(
            "{}x{} grid declared without channel data in a {} byte file",
            nx,
            ny,
            bytes.len()
        ))
        .into());
    }

    let mut missing_channels = Vec::new();
    let mut channels: Vec<Vec<f64>> = Vec::with_capacity(CHANNEL_NAMES.len());
    for name in CHANNEL_NAMES {
        match ds.variable(name) {
            Some(var) => {
                let values = var.values.to_f64_vec();
                if values.len() != cells {
                    return Err(invalid_raster(format!(
                        "Channel '{}' has {} values, expected {}",
                        name,
                        values.len(),
                        cells
                    ))
                    .into());
                }
                channels.push(values);
            }
            None => {
                missing_channels.push(name);
                channels.push(vec![-127.0; cells]);
            }
        }
    }
    if !missing_channels.is_empty() {
        log::debug!("Substituted missing channels: {}", missing_channels.join(", "));
    }

    let mut pixels = PixelMap::new();
    for row in 0..ny {
        let file_row = ny - 1 - row;
        for col in 0..nx {
            let index = file_row * nx + col;
            let int = |channel: usize| channels[channel][index] as i32;
            let mut pixel = Pixel {
                vegetation_type: int(0),
                soil_type: int(1),
                pavement_type: int(2),
                water_type: int(3),
                building_id: int(4),
                building_height: channels[5][index],
                building_type: int(6),
                outline: DisplayColor::Grey,
                ..Pixel::UNSET
            };
            pixel.color = decoded_color(&pixel);
            pixels.insert(CellCoord::new(row, col), pixel);
        }
    }

    let global_f64 = |name: &str, default: f64| {
        ds.attribute(name).and_then(|v| v.get_f64(0)).unwrap_or(default)
    };
    let defaults = Origin::default();
    let origin = Origin {
        latitude: global_f64("origin_lat", defaults.latitude),
        longitude: global_f64("origin_lon", defaults.longitude),
        x: global_f64("origin_x", defaults.x),
        y: global_f64("origin_y", defaults.y),
        rotation_angle: global_f64("rotation_angle", defaults.rotation_angle),
    };

    let mut driver = DriverInfo::default();
    if let Some(title) = ds.attribute("title").and_then(|v| v.as_text()) {
        driver.title = title;
    }
    if let Some(author) = ds.attribute("author").and_then(|v| v.as_text()) {
        driver.author = author;
    }

    Ok(DecodedRaster {
        grid: Grid::from_parts(nx, ny, res, pixels).with_origin(origin),
        driver,
        missing_channels,
    })
}

fn invalid_raster(message: String) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, message)
}

/// Display color of a decoded cell: water, building, pavement, vegetation, soil, else white
pub fn decoded_color(pixel: &Pixel) -> DisplayColor {
    if pixel.water_type > -1 {
        DisplayColor::Blue
    } else if pixel.building_id > -1 {
        DisplayColor::Black
    } else if pixel.pavement_type > -1 {
        DisplayColor::Grey
    } else if pixel.vegetation_type > -1 {
        DisplayColor::Green
    } else if pixel.soil_type == 1 {
        DisplayColor::Brown
    } else {
        DisplayColor::White
    }
}

/// Encode and write to `path`
pub fn save(grid: &Grid, driver: &DriverInfo, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let bytes = encode(grid, driver)?;
    std::fs::write(path, &bytes)?;
    log::info!("Saved {}x{} raster to {} ({} bytes)", grid.nx(), grid.ny(), path.display(), bytes.len());
    Ok(())
}

/// Read and decode `path`
pub fn load(path: impl AsRef<Path>) -> Result<DecodedRaster> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)?;
    let decoded = decode(&bytes)?;
    log::info!(
        "Loaded {}x{} raster from {}",
        decoded.grid.nx(),
        decoded.grid.ny(),
        path.display()
    );
    Ok(decoded)
}

/// True if `bytes` start with the netCDF classic magic
pub fn is_raster(bytes: &[u8]) -> bool {
    bytes.starts_with(b"CDF")
}
