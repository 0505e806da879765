extern crate clap;
extern crate image;
extern crate mandelview;
extern crate num_cpus;

use clap::{App, Arg, ArgMatches};
use image::png::PNGEncoder;
use image::ColorType;
use mandelview::{EscapeTimeRenderer, ViewSpec, MAX_ITERATION_LIMIT};
use std::fs::File;
use std::path::Path;
use std::str::FromStr;

fn parse_pair<T>(s: &str, separator: char) -> Option<(T, T)>
where
    T: FromStr,
{
    match s.find(separator) {
        None => None,
        Some(index) => match (T::from_str(&s[..index]), T::from_str(&s[index + 1..])) {
            (Ok(l), Ok(r)) => Some((l, r)),
            _ => None,
        },
    }
}

fn validate_pair<T: FromStr>(s: &str, separator: char, err: &str) -> Result<(), String> {
    match parse_pair::<T>(s, separator) {
        Some(_) => Ok(()),
        None => Err(err.to_string()),
    }
}

fn validate_range<T: FromStr + Ord>(
    s: &str,
    low: T,
    high: T,
    isnotanumber_err: &str,
    isnotinrange_err: &str,
) -> Result<(), String> {
    match T::from_str(s) {
        Ok(i) => {
            if i >= low && i <= high {
                Ok(())
            } else {
                Err(isnotinrange_err.to_string())
            }
        }
        Err(_) => Err(isnotanumber_err.to_string()),
    }
}

fn validate_zoom(s: &str) -> Result<(), String> {
    match f64::from_str(s) {
        Ok(z) => {
            if z > 0.0 && z.is_finite() {
                Ok(())
            } else {
                Err("Zoom must be a positive number".to_string())
            }
        }
        Err(_) => Err("Could not parse zoom factor".to_string()),
    }
}

const OUTPUT: &str = "output";
const SIZE: &str = "size";
const CENTER: &str = "center";
const ZOOM: &str = "zoom";
const ITERATIONS: &str = "iterations";
const THREADS: &str = "threads";

fn args<'a>() -> ArgMatches<'a> {
    let max_threads = num_cpus::get();

    App::new("mandel")
        .version("0.1.0")
        .about("Mandelbrot renderer")
        .arg(
            Arg::with_name(OUTPUT)
                .required(true)
                .long(OUTPUT)
                .short("o")
                .takes_value(true)
                .help("Output file"),
        )
        .arg(
            Arg::with_name(SIZE)
                .required(false)
                .long(SIZE)
                .short("s")
                .takes_value(true)
                .default_value("700x700")
                .validator(|s| validate_pair::<u16>(&s, 'x', "Could not parse output image size"))
                .help("Size of output image"),
        )
        .arg(
            Arg::with_name(CENTER)
                .required(false)
                .long(CENTER)
                .short("c")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("-0.5,0.0")
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse view center"))
                .help("Center of the view on the complex plane"),
        )
        .arg(
            Arg::with_name(ZOOM)
                .required(false)
                .long(ZOOM)
                .short("z")
                .takes_value(true)
                .default_value("1.0")
                .validator(|s| validate_zoom(&s))
                .help("Magnification of the view"),
        )
        .arg(
            Arg::with_name(ITERATIONS)
                .required(false)
                .long(ITERATIONS)
                .short("i")
                .takes_value(true)
                .default_value("200")
                .validator(move |s| {
                    validate_range(
                        &s,
                        1,
                        MAX_ITERATION_LIMIT,
                        "Could not parse iteration count",
                        &format!(
                            "Iteration count must be between 1 and {}",
                            MAX_ITERATION_LIMIT
                        ),
                    )
                })
                .help("Per-pixel iteration budget"),
        )
        .arg(
            Arg::with_name(THREADS)
                .required(false)
                .long(THREADS)
                .short("t")
                .takes_value(true)
                .default_value("1")
                .validator(move |s| {
                    validate_range(
                        &s,
                        1,
                        max_threads,
                        "Could not parse thread count",
                        &format!("Thread count must be between 1 and {}", max_threads),
                    )
                })
                .help("Number of threads to use in solver"),
        )
        .get_matches()
}

fn write_image(outfile: &str, pixels: &[u8], bounds: (usize, usize)) -> Result<(), std::io::Error> {
    let path = Path::new(outfile);
    let output = File::create(&path)?;
    let encoder = PNGEncoder::new(output);
    encoder.encode(pixels, bounds.0 as u32, bounds.1 as u32, ColorType::RGBA(8))?;
    Ok(())
}

fn main() {
    let matches = args();
    let image_size: (usize, usize) =
        parse_pair(matches.value_of(SIZE).unwrap(), 'x').expect("Error parsing image dimensions");
    let center: (f64, f64) =
        parse_pair(matches.value_of(CENTER).unwrap(), ',').expect("Error parsing view center");
    let zoom = f64::from_str(matches.value_of(ZOOM).unwrap()).expect("Error parsing zoom factor");
    let iterations = usize::from_str(matches.value_of(ITERATIONS).unwrap())
        .expect("Could not parse iteration count.");
    let threads =
        usize::from_str(matches.value_of(THREADS).unwrap()).expect("Could not parse thread count.");

    let spec = ViewSpec {
        center_x: center.0,
        center_y: center.1,
        zoom,
        max_iterations: iterations,
        width: image_size.0,
        height: image_size.1,
    };

    match EscapeTimeRenderer::new(&spec) {
        Err(e) => {
            eprintln!("Render failure: {}", e);
            std::process::exit(1);
        }
        Ok(renderer) => {
            let (pixels, elapsed) = if threads > 1 {
                renderer.render_threaded(threads)
            } else {
                renderer.render()
            };
            write_image(matches.value_of(OUTPUT).unwrap(), &pixels, image_size).unwrap();
            eprintln!(
                "Center=({},{}), Zoom={}, MaxIter={}, Render time={} ms",
                spec.center_x,
                spec.center_y,
                spec.zoom,
                spec.max_iterations,
                elapsed.as_millis()
            );
        }
    }
}
