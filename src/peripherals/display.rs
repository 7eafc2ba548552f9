//! Display control module for PineTime

use display_interface_spi::SPIInterface;
use embassy_nrf::{
    gpio::Output,
    peripherals::{P0_18, P0_25, P0_26},
    spim::{self, Spim},
};
use embassy_time::Delay;
use embedded_graphics::{pixelcolor::Rgb565, prelude::*, primitives::Rectangle};
use mipidsi::{models::ST7789, Builder, Orientation};

const LCD_W: u16 = 240;
const LCD_H: u16 = 240;

type Lcd<SPI> = mipidsi::Display<
    SPIInterface<Spim<'static, SPI>, Output<'static, P0_18>, Output<'static, P0_25>>,
    ST7789,
    Output<'static, P0_26>,
>;

#[derive(Debug, Clone, Copy, defmt::Format)]
pub struct InitError;

/// ST7789 panel as a draw target.
pub struct Display<SPI>
where
    SPI: spim::Instance,
{
    lcd: Lcd<SPI>,
}

impl<SPI> Display<SPI>
where
    SPI: spim::Instance,
{
    /// Configure display settings on boot
    pub fn init(
        spim: Spim<'static, SPI>,
        cs_pin: Output<'static, P0_25>,
        dc_pin: Output<'static, P0_18>,
        rst_pin: Output<'static, P0_26>,
    ) -> Result<Self, InitError> {
        let lcd = Builder::st7789(SPIInterface::new(spim, dc_pin, cs_pin))
            .with_display_size(LCD_W, LCD_H)
            .with_orientation(Orientation::Portrait(false))
            .init(&mut Delay, Some(rst_pin))
            .map_err(|_| InitError)?;
        Ok(Self { lcd })
    }
}

impl<SPI> OriginDimensions for Display<SPI>
where
    SPI: spim::Instance,
{
    fn size(&self) -> Size {
        Size::new(LCD_W as u32, LCD_H as u32)
    }
}

impl<SPI> DrawTarget for Display<SPI>
where
    SPI: spim::Instance,
{
    type Color = Rgb565;
    type Error = <Lcd<SPI> as DrawTarget>::Error;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        self.lcd.draw_iter(pixels)
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        self.lcd.fill_solid(area, color)
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.lcd.clear(color)
    }
}
