//! The face, drawn outside in.
//!
//! [`render`] runs the layers in order: dial, battery ring, event arcs,
//! next-event countdown, date box, hands. In ambient mode only the dial and
//! the hands are drawn.

use calwatch_core::dial::{
    TICK_COUNT, battery_sweep, battery_tip_rotation, hour_rotation, is_hour_tick, minute_rotation,
    second_rotation, tick_rotation,
};
use calwatch_core::{ArcSpan, CalendarEvent, Color, Point, TOP_ANGLE, next_event, polar_point};
use chrono::{Datelike, Timelike, Weekday};

use crate::context::RenderContext;
use crate::primitives::{DrawCommand, Frame, Paint, PaintStyle, Rect, StrokeCap, Typeface};

/// Renders one frame.
pub fn render(ctx: &RenderContext<'_>) -> Frame {
    let mut frame = Frame::new(ctx.width, ctx.height);

    draw_dial(ctx, &mut frame);
    if !ctx.mode.ambient {
        draw_battery(ctx, &mut frame);
        draw_event_arcs(ctx, &mut frame);
        draw_next_event(ctx, &mut frame);
        draw_date_box(ctx, &mut frame);
    }
    draw_hands(ctx, &mut frame);

    frame
}

/// Background and the sixty minute ticks.
pub fn draw_dial(ctx: &RenderContext<'_>, frame: &mut Frame) {
    frame.push(DrawCommand::Clear {
        color: ctx.paints.background,
    });

    let center = ctx.center();
    let outer = center.x - 5.0;
    for index in 0..TICK_COUNT {
        let (inner, paint) = if is_hour_tick(index) {
            (center.x - 35.0, ctx.paints.tick_big)
        } else {
            (center.x - 20.0, ctx.paints.tick_small)
        };
        let rotation = tick_rotation(index);
        frame.push(DrawCommand::Line {
            from: polar_point(center, inner, rotation),
            to: polar_point(center, outer, rotation),
            paint,
        });
    }
}

/// Ring along the rim showing battery charge, with a dot at its tip.
pub fn draw_battery(ctx: &RenderContext<'_>, frame: &mut Frame) {
    let battery = ctx.battery;
    if !battery.is_known() {
        return;
    }

    let paint = Paint::stroke(Color::BLUE.with_alpha(100), 5.0).with_cap(StrokeCap::Round);
    let oval = Rect::centered(ctx.width_f(), ctx.height_f(), ctx.width_f() - 35.0, ctx.height_f() - 35.0);
    frame.push(DrawCommand::Arc {
        oval,
        start_angle: TOP_ANGLE,
        sweep_angle: battery_sweep(battery.level, battery.scale),
        use_center: false,
        paint,
    });

    let tip = polar_point(
        ctx.center(),
        oval.width() / 2.0,
        battery_tip_rotation(battery.level, battery.scale),
    );
    frame.push(DrawCommand::Circle {
        center: tip,
        radius: 6.0,
        paint: paint.with_style(PaintStyle::FillAndStroke),
    });
}

/// One arc per timed event, then the two frame circles around them.
pub fn draw_event_arcs(ctx: &RenderContext<'_>, frame: &mut Frame) {
    for event in ctx.events.iter().filter(|e| e.is_drawable()) {
        draw_event_arc(ctx, event, frame);
    }

    let center = ctx.center();
    let paint = Paint::stroke(Color::LIGHT_GRAY, 2.0);
    for radius in [center.x - 35.0, center.x - 50.0] {
        frame.push(DrawCommand::Circle {
            center,
            radius,
            paint,
        });
    }
}

fn draw_event_arc(ctx: &RenderContext<'_>, event: &CalendarEvent, frame: &mut Frame) {
    let Some((start, end)) = event.span() else {
        return;
    };
    let tz = ctx.now.timezone();
    let arc = ArcSpan::between(&start.with_timezone(&tz), &end.with_timezone(&tz));

    let (w, h) = (ctx.width_f(), ctx.height_f());
    let upper = Rect::centered(w, h, w - 70.0, w - 70.0);
    let lower = Rect::centered(w, h, w - 100.0, w - 100.0);

    frame.push(DrawCommand::Arc {
        oval: upper,
        start_angle: arc.start_angle,
        sweep_angle: arc.sweep(),
        use_center: true,
        paint: Paint::fill(event.calendar_color),
    });
    frame.push(DrawCommand::Arc {
        oval: lower,
        start_angle: arc.start_angle,
        sweep_angle: arc.sweep(),
        use_center: true,
        paint: Paint::fill(Color::WHITE).with_style(PaintStyle::FillAndStroke),
    });

    let center = ctx.center();
    let (inner, outer) = (lower.width() / 2.0, upper.width() / 2.0);
    let side = Paint::stroke(Color::LIGHT_GRAY, 2.0);
    for rotation in [arc.start_rotation(), arc.end_rotation()] {
        frame.push(DrawCommand::Line {
            from: polar_point(center, inner, rotation),
            to: polar_point(center, outer, rotation),
            paint: side,
        });
    }

    frame.push(DrawCommand::TextOnArc {
        text: event.title.clone(),
        oval: upper,
        start_angle: arc.start_angle,
        sweep_angle: arc.sweep(),
        h_offset: 0.0,
        v_offset: 12.0,
        paint: Paint::text(Color::BLACK, 11.0),
    });
}

/// Caption and countdown for the earliest timed event.
pub fn draw_next_event(ctx: &RenderContext<'_>, frame: &mut Frame) {
    let Some(next) = next_event(ctx.events, ctx.now_utc()) else {
        return;
    };

    let message = ctx.language.next_event_message(&next.event.title, next.phase);
    let countdown = next.countdown();
    let (upper, lower) = if ctx.language.message_first() {
        ((message, 12.0), (countdown, 18.0))
    } else {
        ((countdown, 18.0), (message, 12.0))
    };

    let center = ctx.center();
    let line_height = (14.0_f64 * 1.5).trunc();
    for ((text, size), y) in [(upper, center.y - 70.0), (lower, center.y - 70.0 + line_height)] {
        frame.push(DrawCommand::Text {
            text,
            origin: Point::new(center.x, y),
            paint: Paint::text(Color::GRAY, size),
        });
    }
}

/// Weekday and day-of-month boxes on the right of the dial.
pub fn draw_date_box(ctx: &RenderContext<'_>, frame: &mut Frame) {
    const WEEKDAY_WIDTH: f64 = 40.0;
    const DATE_WIDTH: f64 = 30.0;
    const HEIGHT: f64 = 20.0;
    const TEXT_SIZE: f64 = 16.0;

    let weekday_x = ctx.width_f() - WEEKDAY_WIDTH - 85.0;
    let date_x = weekday_x + WEEKDAY_WIDTH;
    let y = (ctx.center().y - HEIGHT / 2.0).trunc();

    let border = Paint::stroke(Color::LIGHT_GRAY, 1.0);
    frame.push(DrawCommand::Rect {
        rect: Rect::new(weekday_x, y, weekday_x + WEEKDAY_WIDTH, y + HEIGHT),
        paint: border,
    });
    frame.push(DrawCommand::Rect {
        rect: Rect::new(date_x, y, date_x + DATE_WIDTH, y + HEIGHT),
        paint: border,
    });
    frame.push(DrawCommand::Rect {
        rect: Rect::new(weekday_x, y, date_x + DATE_WIDTH, y + HEIGHT),
        paint: Paint::stroke(Color::DARK_GRAY, 1.0),
    });

    let text = Paint::text(Color::BLACK, TEXT_SIZE).with_typeface(Typeface::Serif);
    frame.push(DrawCommand::Text {
        text: format!("{:02}", ctx.now.day()),
        origin: Point::new(date_x + DATE_WIDTH / 2.0, y + TEXT_SIZE),
        paint: text,
    });

    let weekday = ctx.weekday();
    let weekday_color = match weekday {
        Weekday::Sat => Color::BLUE,
        Weekday::Sun => Color::RED,
        _ => Color::BLACK,
    };
    frame.push(DrawCommand::Text {
        text: ctx.language.weekday_label(weekday).to_string(),
        origin: Point::new(weekday_x + WEEKDAY_WIDTH / 2.0, y + TEXT_SIZE),
        paint: Paint { color: weekday_color, ..text },
    });
}

/// Hour, minute and (when interactive) second hands.
pub fn draw_hands(ctx: &RenderContext<'_>, frame: &mut Frame) {
    let center = ctx.center();
    let now = &ctx.now;

    frame.push(DrawCommand::Line {
        from: center,
        to: polar_point(center, center.x - 58.0, hour_rotation(now.hour(), now.minute())),
        paint: ctx.paints.hour_hand,
    });
    frame.push(DrawCommand::Line {
        from: center,
        to: polar_point(center, center.x - 5.0, minute_rotation(now.minute())),
        paint: ctx.paints.minute_hand,
    });

    if ctx.mode.ambient {
        return;
    }
    let tip = polar_point(center, center.x - 42.0, second_rotation(now.second()));
    frame.push(DrawCommand::Line {
        from: center,
        to: tip,
        paint: ctx.paints.second_hand,
    });
    frame.push(DrawCommand::Circle {
        center: tip,
        radius: 8.0,
        paint: ctx.paints.second_tip(),
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{BatteryLevel, DisplayMode, Language};
    use chrono::{DateTime, TimeZone, Utc};
    use chrono_tz::Asia::Tokyo;

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
    }

    /// 2015-05-27 10:08:36 in Tokyo, a Wednesday.
    fn now() -> DateTime<chrono_tz::Tz> {
        utc(2015, 5, 27, 1, 8, 36).with_timezone(&Tokyo)
    }

    fn tokyo(h: u32) -> DateTime<Utc> {
        Tokyo.with_ymd_and_hms(2015, 5, 27, h, 0, 0).unwrap().with_timezone(&Utc)
    }

    fn events() -> Vec<CalendarEvent> {
        vec![
            CalendarEvent::new("Dinner", tokyo(19), tokyo(21)),
            CalendarEvent::new("Visit", tokyo(13), tokyo(16)),
            CalendarEvent::new("Meeting", tokyo(11), tokyo(12))
                .with_calendar(1, Color::argb(0xff, 0x42, 0xd6, 0x92)),
            CalendarEvent::new("Holiday", tokyo(0), tokyo(0)).with_all_day(true),
        ]
    }

    fn count(frame: &Frame, pred: impl Fn(&DrawCommand) -> bool) -> usize {
        frame.commands.iter().filter(|c| pred(c)).count()
    }

    mod dial {
        use super::*;

        #[test]
        fn sixty_ticks_after_clear() {
            let events = events();
            let ctx = RenderContext::new(320, 320, DisplayMode::default(), now(), &events);
            let mut frame = Frame::new(320, 320);
            draw_dial(&ctx, &mut frame);

            assert_eq!(frame.commands[0], DrawCommand::Clear { color: Color::WHITE });
            assert_eq!(frame.len(), 61);
            let big = count(&frame, |c| matches!(c, DrawCommand::Line { paint, .. } if paint.stroke_width == 8.0));
            assert_eq!(big, 12);
        }

        #[test]
        fn top_tick_points_up() {
            let ctx = RenderContext::new(320, 320, DisplayMode::default(), now(), &[]);
            let mut frame = Frame::new(320, 320);
            draw_dial(&ctx, &mut frame);
            let DrawCommand::Line { from, to, .. } = &frame.commands[1] else {
                panic!("expected a tick line");
            };
            assert!((from.x - 160.0).abs() < 1e-9 && (from.y - 35.0).abs() < 1e-9);
            assert!((to.x - 160.0).abs() < 1e-9 && (to.y - 5.0).abs() < 1e-9);
        }
    }

    mod layers_by_mode {
        use super::*;

        #[test]
        fn interactive_frame_has_every_layer() {
            let events = events();
            let ctx = RenderContext::new(320, 320, DisplayMode::default(), now(), &events)
                .with_battery(BatteryLevel::new(29, 100));
            let frame = render(&ctx);

            // Three timed events, all-day skipped.
            let pies = count(&frame, |c| matches!(c, DrawCommand::Arc { use_center: true, .. }));
            assert_eq!(pies, 6);
            assert_eq!(count(&frame, |c| matches!(c, DrawCommand::TextOnArc { .. })), 3);
            // Battery ring.
            assert_eq!(count(&frame, |c| matches!(c, DrawCommand::Arc { use_center: false, .. })), 1);
            // Second hand tip.
            assert!(matches!(frame.commands.last(), Some(DrawCommand::Circle { radius, .. }) if *radius == 8.0));
        }

        #[test]
        fn ambient_frame_is_dial_and_hands_only() {
            let events = events();
            let mode = DisplayMode {
                ambient: true,
                ..DisplayMode::default()
            };
            let ctx = RenderContext::new(320, 320, mode, now(), &events)
                .with_battery(BatteryLevel::new(29, 100));
            let frame = render(&ctx);

            assert_eq!(frame.commands[0], DrawCommand::Clear { color: Color::BLACK });
            // Clear, 60 ticks, hour and minute hands.
            assert_eq!(frame.len(), 63);
            assert!(frame.texts().is_empty());
        }

        #[test]
        fn unknown_battery_draws_no_ring() {
            let ctx = RenderContext::new(320, 320, DisplayMode::default(), now(), &[]);
            let mut frame = Frame::new(320, 320);
            draw_battery(&ctx, &mut frame);
            assert!(frame.is_empty());
        }
    }

    mod text {
        use super::*;

        #[test]
        fn english_countdown_then_caption() {
            let events = events();
            let ctx = RenderContext::new(320, 320, DisplayMode::default(), now(), &events);
            let mut frame = Frame::new(320, 320);
            draw_next_event(&ctx, &mut frame);
            insta::assert_snapshot!(frame.texts().join("\n"), @r"
            00:51:24
            until Meeting
            ");
        }

        #[test]
        fn japanese_caption_then_countdown() {
            let events = events();
            let ctx = RenderContext::new(320, 320, DisplayMode::default(), now(), &events)
                .with_language(Language::Ja);
            let mut frame = Frame::new(320, 320);
            draw_next_event(&ctx, &mut frame);
            assert_eq!(frame.texts(), ["Meetingまで", "00:51:24"]);
            let DrawCommand::Text { origin, paint, .. } = &frame.commands[0] else {
                panic!("expected text");
            };
            assert_eq!(*origin, Point::new(160.0, 90.0));
            assert_eq!(paint.text_size, 12.0);
        }

        #[test]
        fn no_timed_event_no_countdown() {
            let ctx = RenderContext::new(320, 320, DisplayMode::default(), now(), &[]);
            let mut frame = Frame::new(320, 320);
            draw_next_event(&ctx, &mut frame);
            assert!(frame.is_empty());
        }

        #[test]
        fn event_titles_follow_painting_order() {
            let events = events();
            let ctx = RenderContext::new(320, 320, DisplayMode::default(), now(), &events);
            let mut frame = Frame::new(320, 320);
            draw_event_arcs(&ctx, &mut frame);
            assert_eq!(frame.texts(), ["Dinner", "Visit", "Meeting"]);
        }
    }

    mod date_box {
        use super::*;

        fn date_texts(now: DateTime<chrono_tz::Tz>) -> Vec<(String, Color)> {
            let ctx = RenderContext::new(320, 320, DisplayMode::default(), now, &[]);
            let mut frame = Frame::new(320, 320);
            draw_date_box(&ctx, &mut frame);
            frame
                .commands
                .into_iter()
                .filter_map(|c| match c {
                    DrawCommand::Text { text, paint, .. } => Some((text, paint.color)),
                    _ => None,
                })
                .collect()
        }

        #[test]
        fn weekday_in_black() {
            assert_eq!(
                date_texts(now()),
                [("27".to_string(), Color::BLACK), ("Wed".to_string(), Color::BLACK)]
            );
        }

        #[test]
        fn saturday_blue_sunday_red() {
            let saturday = utc(2015, 5, 30, 3, 0, 0).with_timezone(&Tokyo);
            let sunday = utc(2015, 5, 31, 3, 0, 0).with_timezone(&Tokyo);
            assert_eq!(date_texts(saturday)[1], ("Sat".to_string(), Color::BLUE));
            assert_eq!(date_texts(sunday)[1], ("Sun".to_string(), Color::RED));
        }

        #[test]
        fn single_digit_day_is_padded() {
            let first = utc(2015, 6, 1, 3, 0, 0).with_timezone(&Tokyo);
            assert_eq!(date_texts(first)[0].0, "01");
        }

        #[test]
        fn box_position() {
            let ctx = RenderContext::new(320, 320, DisplayMode::default(), now(), &[]);
            let mut frame = Frame::new(320, 320);
            draw_date_box(&ctx, &mut frame);
            assert_eq!(
                frame.commands[2],
                DrawCommand::Rect {
                    rect: Rect::new(195.0, 150.0, 265.0, 170.0),
                    paint: Paint::stroke(Color::DARK_GRAY, 1.0),
                }
            );
        }
    }

    mod hands {
        use super::*;

        #[test]
        fn minute_hand_length() {
            let ctx = RenderContext::new(320, 320, DisplayMode::default(), now(), &[]);
            let mut frame = Frame::new(320, 320);
            draw_hands(&ctx, &mut frame);
            assert_eq!(frame.len(), 4);
            let DrawCommand::Line { from, to, .. } = &frame.commands[1] else {
                panic!("expected minute hand");
            };
            let length = ((to.x - from.x).powi(2) + (to.y - from.y).powi(2)).sqrt();
            assert!((length - 155.0).abs() < 1e-9);
        }

        #[test]
        fn ambient_has_no_second_hand() {
            let mode = DisplayMode {
                ambient: true,
                ..DisplayMode::default()
            };
            let ctx = RenderContext::new(320, 320, mode, now(), &[]);
            let mut frame = Frame::new(320, 320);
            draw_hands(&ctx, &mut frame);
            assert_eq!(frame.len(), 2);
        }
    }
}
