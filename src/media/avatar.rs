use std::{fs::File, io::BufReader, io::Read, time::Duration};

use gif::{ColorOutput, DecodeOptions, DisposalMethod};

use crate::{
    assets::AssetDir,
    constants::graphics::DEFAULT_FRAME_DELAY,
    io::{
        fmt::{Cell, Color, FormattedExt},
        Screen, XY,
    },
    timing::Instant,
    ui::{Attachment, Region},
    Result,
};

/// One fully composited frame, already scaled to the animation's size.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    /// row-major, `None` where transparent
    pixels: Vec<Option<[u8; 3]>>,
    delay: Duration,
}

impl Frame {
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

/// The full-size image frames get drawn onto, so later frames can be partial updates.
struct Canvas {
    size: XY,
    rgba: Vec<[u8; 4]>,
}

impl Canvas {
    fn new(size: XY) -> Self {
        Self {
            size,
            rgba: vec![[0; 4]; size.area()],
        }
    }

    /// Every canvas position `frame` covers, with the matching index into its buffer.
    fn covered(size: XY, frame: &gif::Frame<'_>) -> impl Iterator<Item = (usize, usize)> {
        let (left, top) = (frame.left as usize, frame.top as usize);
        let (w, h) = (frame.width as usize, frame.height as usize);
        (0..h).flat_map(move |fy| {
            (0..w).filter_map(move |fx| {
                let (cx, cy) = (left + fx, top + fy);
                (cx < size.x() && cy < size.y()).then(|| (cy * size.x() + cx, fy * w + fx))
            })
        })
    }

    fn paint(&mut self, frame: &gif::Frame<'_>) {
        for (dest, src) in Self::covered(self.size, frame) {
            let px = match frame.buffer.get(src * 4..src * 4 + 4) {
                Some(px) => px,
                None => continue,
            };
            if px[3] != 0 {
                self.rgba[dest] = [px[0], px[1], px[2], px[3]];
            }
        }
    }

    fn clear(&mut self, frame: &gif::Frame<'_>) {
        for (dest, _) in Self::covered(self.size, frame) {
            self.rgba[dest] = [0; 4];
        }
    }

    /// Box-filter down (or repeat up) to `to`. A target pixel is transparent unless at least half its box is opaque.
    fn scaled(&self, to: XY) -> Vec<Option<[u8; 3]>> {
        let XY(w, h) = self.size;
        let span = |t: usize, of: usize, len: usize| {
            let start = t * len / of;
            start..((t + 1) * len / of).max(start + 1)
        };
        let mut out = Vec::with_capacity(to.area());
        for ty in 0..to.y() {
            for tx in 0..to.x() {
                let (mut sum, mut opaque, mut total) = ([0usize; 3], 0, 0);
                for sy in span(ty, to.y(), h) {
                    for sx in span(tx, to.x(), w) {
                        total += 1;
                        let px = self.rgba[sy * w + sx];
                        if px[3] != 0 {
                            opaque += 1;
                            for c in 0..3 {
                                sum[c] += px[c] as usize;
                            }
                        }
                    }
                }
                out.push((opaque * 2 >= total && opaque > 0).then(|| sum.map(|s| (s / opaque) as u8)));
            }
        }
        out
    }
}

/// A looping animation, decoded up front.
pub struct Animation {
    size: XY,
    frames: Vec<Frame>,
    current: usize,
    next_at: Option<Instant>,
}

impl Animation {
    /// Load and decode a GIF asset, scaled to `size` pixels.
    pub fn load(assets: &AssetDir, name: &str, size: XY) -> Result<Self> {
        let file = File::open(assets.path(name))?;
        Self::decode(BufReader::new(file), size)
    }

    /// Decode every frame of a GIF, scaled to `size` pixels.
    ///
    /// Frames are composited the way the GIF says to dispose of them, so partial frames come out whole. A frame with
    /// no delay gets the default one.
    pub fn decode(reader: impl Read, size: XY) -> Result<Self> {
        if size.area() == 0 {
            return Err("can't scale an animation to nothing".into());
        }
        let mut options = DecodeOptions::new();
        options.set_color_output(ColorOutput::RGBA);
        let mut decoder = options.read_info(reader)?;
        let mut canvas = Canvas::new(XY(decoder.width() as usize, decoder.height() as usize));
        if canvas.size.area() == 0 {
            return Err("animation is empty".into());
        }

        let mut frames = vec![];
        while let Some(frame) = decoder.read_next_frame()? {
            let saved = (frame.dispose == DisposalMethod::Previous).then(|| canvas.rgba.clone());
            canvas.paint(frame);
            let delay = match frame.delay {
                0 => DEFAULT_FRAME_DELAY,
                // in hundredths of a second
                cs => Duration::from_millis(cs as u64 * 10),
            };
            frames.push(Frame {
                pixels: canvas.scaled(size),
                delay,
            });
            match (frame.dispose, saved) {
                (DisposalMethod::Background, _) => canvas.clear(frame),
                (DisposalMethod::Previous, Some(saved)) => canvas.rgba = saved,
                _ => (),
            }
        }
        if frames.is_empty() {
            return Err("animation has no frames".into());
        }
        Ok(Self {
            size,
            frames,
            current: 0,
            next_at: None,
        })
    }

    /// Size in pixels.
    pub fn size(&self) -> XY {
        self.size
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Index of the frame being shown.
    pub fn current(&self) -> usize {
        self.current
    }

    /// The color of one pixel of the current frame, or `None` if it's transparent or out of bounds.
    pub fn pixel(&self, pos: XY) -> Option<[u8; 3]> {
        if pos.x() >= self.size.x() || pos.y() >= self.size.y() {
            return None;
        }
        self.frames[self.current].pixels[pos.y() * self.size.x() + pos.x()]
    }

    /// Move to the next frame if the current one has been up long enough. Returns whether the frame changed.
    ///
    /// The first call starts the clock.
    pub fn advance(&mut self, now: Instant) -> bool {
        if self.frames.len() < 2 {
            return false;
        }
        let due = match self.next_at {
            Some(due) => due,
            None => {
                self.next_at = Some(now + self.frames[self.current].delay);
                return false;
            }
        };
        if now < due {
            return false;
        }
        self.current = (self.current + 1) % self.frames.len();
        let delay = self.frames[self.current].delay;
        // stay on schedule, unless we've fallen more than a whole frame behind
        let next = due + delay;
        self.next_at = Some(if next > now { next } else { now + delay });
        true
    }

    /// When [`Self::advance`] will next change the frame. `None` for still images, or if the clock hasn't started.
    pub fn next_frame_at(&self) -> Option<Instant> {
        if self.frames.len() < 2 {
            None
        } else {
            self.next_at
        }
    }
}

/// Draws the current frame of an animation with half-block characters, two pixels per cell.
///
/// Without an animation, draws a shaded placeholder box.
pub struct Picture<'a>(pub Option<&'a Animation>);

fn rgb(px: [u8; 3]) -> Color {
    Color::Rgb(px[0], px[1], px[2])
}

impl<'a> Attachment for Picture<'a> {
    type Output = ();

    fn attach(self, region: Region, screen: &mut Screen) {
        let anim = match self.0 {
            Some(anim) => anim,
            None => return region.fill(screen, crate::cell!(bright_black '░')),
        };
        let bounds = region.bounds();
        for cy in 0..bounds.size.y() {
            for cx in 0..bounds.size.x() {
                let top = anim.pixel(XY(cx, cy * 2));
                let bottom = anim.pixel(XY(cx, cy * 2 + 1));
                let cell = match (top, bottom) {
                    (Some(t), Some(b)) => Cell::of('▀').fg(rgb(t)).bg(rgb(b)),
                    (Some(t), None) => Cell::of('▀').fg(rgb(t)),
                    (None, Some(b)) => Cell::of('▄').fg(rgb(b)),
                    (None, None) => Cell::BLANK,
                };
                if let Some(dest) = screen.cell_mut(bounds.pos + XY(cx, cy)) {
                    *dest = cell;
                }
            }
        }
    }
}

#[cfg(test)]
mod test {
    use std::borrow::Cow;

    use mock_instant::MockClock;

    use crate::io::{fmt::Formatted, Action};

    use super::*;

    const RED: [u8; 3] = [255, 0, 0];
    const GREEN: [u8; 3] = [0, 255, 0];
    const PALETTE: [u8; 12] = [0, 0, 0, 255, 0, 0, 0, 255, 0, 0, 0, 255];

    fn frame(rect: (u16, u16, u16, u16), index: u8, delay: u16, dispose: DisposalMethod) -> gif::Frame<'static> {
        let (left, top, width, height) = rect;
        gif::Frame {
            left,
            top,
            width,
            height,
            delay,
            dispose,
            buffer: Cow::Owned(vec![index; width as usize * height as usize]),
            ..gif::Frame::default()
        }
    }

    fn encode(frames: &[gif::Frame]) -> Vec<u8> {
        let mut buf = vec![];
        {
            let mut enc = gif::Encoder::new(&mut buf, 4, 4, &PALETTE).unwrap();
            for f in frames {
                enc.write_frame(f).unwrap();
            }
        }
        buf
    }

    fn pixels(anim: &Animation) -> Vec<Option<[u8; 3]>> {
        (0..2).flat_map(|y| (0..2).map(move |x| XY(x, y))).map(|p| anim.pixel(p)).collect()
    }

    #[test]
    fn partial_frames_are_composited_and_scaled() {
        let data = encode(&[
            frame((0, 0, 4, 4), 1, 5, DisposalMethod::Keep),
            frame((2, 2, 2, 2), 2, 0, DisposalMethod::Keep),
        ]);
        let mut anim = Animation::decode(data.as_slice(), XY(2, 2)).unwrap();
        assert_eq!(anim.frames().len(), 2);
        assert_eq!(anim.frames()[0].delay(), Duration::from_millis(50));
        assert_eq!(anim.frames()[1].delay(), DEFAULT_FRAME_DELAY);
        assert_eq!(pixels(&anim), [Some(RED); 4]);

        let start = Instant::now();
        anim.advance(start);
        assert!(anim.advance(start + Duration::from_millis(50)));
        assert_eq!(pixels(&anim), [Some(RED), Some(RED), Some(RED), Some(GREEN)]);
    }

    #[test]
    fn background_disposal_clears_to_transparent() {
        let data = encode(&[
            frame((0, 0, 4, 4), 1, 1, DisposalMethod::Background),
            frame((0, 0, 2, 2), 2, 1, DisposalMethod::Keep),
        ]);
        let anim = Animation::decode(data.as_slice(), XY(2, 2)).unwrap();
        assert_eq!(anim.frames()[1].pixels, [Some(GREEN), None, None, None]);
    }

    #[test]
    fn previous_disposal_restores() {
        let data = encode(&[
            frame((0, 0, 4, 4), 1, 1, DisposalMethod::Keep),
            frame((0, 0, 2, 2), 2, 1, DisposalMethod::Previous),
            frame((2, 0, 2, 2), 3, 1, DisposalMethod::Keep),
        ]);
        let anim = Animation::decode(data.as_slice(), XY(2, 2)).unwrap();
        // the green square from frame 2 is gone again in frame 3
        assert_eq!(anim.frames()[2].pixels[0], Some(RED));
        assert_eq!(anim.frames()[2].pixels[1], Some([0, 0, 255]));
    }

    #[test]
    fn advances_only_after_the_delay_and_loops() {
        let data = encode(&[
            frame((0, 0, 4, 4), 1, 10, DisposalMethod::Keep),
            frame((0, 0, 4, 4), 2, 20, DisposalMethod::Keep),
        ]);
        let mut anim = Animation::decode(data.as_slice(), XY(2, 2)).unwrap();
        assert_eq!(anim.next_frame_at(), None);
        assert!(!anim.advance(Instant::now()), "first call only starts the clock");
        assert_eq!(anim.next_frame_at(), Some(Instant::now() + Duration::from_millis(100)));

        MockClock::advance(Duration::from_millis(99));
        assert!(!anim.advance(Instant::now()));
        MockClock::advance(Duration::from_millis(1));
        assert!(anim.advance(Instant::now()));
        assert_eq!(anim.current(), 1);

        MockClock::advance(Duration::from_millis(150));
        assert!(!anim.advance(Instant::now()));
        MockClock::advance(Duration::from_millis(50));
        assert!(anim.advance(Instant::now()));
        assert_eq!(anim.current(), 0, "should loop back to the start");
    }

    #[test]
    fn still_images_never_advance() {
        let data = encode(&[frame((0, 0, 4, 4), 1, 10, DisposalMethod::Keep)]);
        let mut anim = Animation::decode(data.as_slice(), XY(2, 2)).unwrap();
        let now = Instant::now();
        assert!(!anim.advance(now));
        assert!(!anim.advance(now + Duration::from_secs(60)));
        assert_eq!(anim.next_frame_at(), None);
    }

    #[test]
    fn garbage_is_a_decode_error() {
        let res = Animation::decode(&b"definitely not a gif"[..], XY(2, 2));
        assert!(matches!(res, Err(crate::Error::Decode(_))));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = AssetDir::at(std::env::temp_dir().join("rochambeau-no-avatars"));
        let res = Animation::load(&dir, "player.gif", XY(2, 2));
        assert!(matches!(res, Err(crate::Error::Io(_))));
    }

    #[test]
    fn pictures_use_half_blocks() {
        let data = encode(&[frame((0, 0, 4, 4), 1, 10, DisposalMethod::Keep)]);
        let anim = Animation::decode(data.as_slice(), XY(2, 2)).unwrap();
        let mut screen = Screen::new(XY(3, 2));
        let region = Region::new(screen.size(), Action::Redraw, None);
        region.attach(&mut screen, Picture(Some(&anim)));
        assert_eq!(screen.row_text(0), "▀▀ ");
        assert_eq!(screen[0][0].get_fmt().fg, Color::Rgb(255, 0, 0));
        assert_eq!(screen[0][0].get_fmt().bg, Color::Rgb(255, 0, 0));
        assert_eq!(screen.row_text(1), "   ");
    }

    #[test]
    fn missing_pictures_get_a_placeholder() {
        let mut screen = Screen::new(XY(2, 1));
        let region = Region::new(screen.size(), Action::Redraw, None);
        region.attach(&mut screen, Picture(None));
        assert_eq!(screen.row_text(0), "░░");
    }
}
