//! Carousel autoplay demo.

use std::io::{self, Write};

use shopfront_storefront::carousel::{Carousel, CarouselPlayer};
use shopfront_storefront::config::StorefrontConfig;
use shopfront_storefront::render::{Region, render_carousel_dots};

use super::CliError;

/// Run autoplay for `ticks` ticks, printing the slide after each.
///
/// With `html`, the dots region is re-rendered on every tick and printed
/// instead.
///
/// # Errors
///
/// Returns an error if `slides` is zero, the dots fail to render or output
/// fails.
pub async fn run(
    config: &StorefrontConfig,
    slides: usize,
    ticks: usize,
    html: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let carousel = Carousel::new(slides).ok_or(CliError::NoSlides)?;
    let mut player = CarouselPlayer::start(carousel, config.carousel_interval)?;
    let mut dots = Region::new("carousel-dots");

    print_slide(player.carousel(), &mut dots, html)?;
    for _ in 0..ticks {
        player.advance().await;
        print_slide(player.carousel(), &mut dots, html)?;
    }
    player.pause();
    Ok(())
}

fn print_slide(
    carousel: &Carousel,
    dots: &mut Region,
    html: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut out = io::stdout().lock();
    if html {
        dots.replace(render_carousel_dots(carousel)?);
        writeln!(out, "{}", dots.content())?;
        return Ok(());
    }

    let symbols: String = carousel
        .dots()
        .iter()
        .map(|dot| if dot.active { '●' } else { '○' })
        .collect();
    writeln!(
        out,
        "{symbols}  slide {}/{}  {}",
        carousel.index() + 1,
        carousel.slide_count(),
        carousel.transform()
    )?;
    Ok(())
}
