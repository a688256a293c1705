// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect, Size};
use understory_draggable::input::{
    EventType, InputFamily, PointerCoords, PointerId, PointerPhase, RawEvent, TouchPhase,
    TouchPoint,
};
use understory_draggable::scheduler::{FrameId, FrameScheduler};
use understory_draggable::{
    BindTarget, ComputedBox, Containment, DragOptions, Draggable, ElementRef, Host,
    PlatformCapabilities, PositionScheme, StyleSnapshot, Translate,
};

const ELEMENT: u32 = 1;
const CONTAINER: u32 = 2;

#[derive(Default)]
struct Frames(u64);

impl FrameScheduler for Frames {
    fn request_frame(&mut self) -> FrameId {
        self.0 += 1;
        FrameId(self.0)
    }

    fn cancel_frame(&mut self, _id: FrameId) {}
}

/// A host that answers geometry queries and drops every write.
#[derive(Default)]
struct NullHost {
    frames: Frames,
}

impl Host for NullHost {
    type Node = u32;

    fn bind(&mut self, _target: BindTarget<u32>, _event: EventType) {}

    fn unbind(&mut self, _target: BindTarget<u32>, _event: EventType) {}

    fn parent(&self, node: u32) -> Option<u32> {
        (node == ELEMENT).then_some(CONTAINER)
    }

    fn computed_box(&self, node: u32) -> ComputedBox {
        let size = if node == CONTAINER {
            Size::new(800.0, 600.0)
        } else {
            Size::new(40.0, 40.0)
        };
        ComputedBox::from_offset_size(size)
    }

    fn bounding_rect(&self, node: u32) -> Rect {
        if node == CONTAINER {
            Rect::new(0.0, 0.0, 800.0, 600.0)
        } else {
            Rect::new(20.0, 20.0, 60.0, 60.0)
        }
    }

    fn style(&self, _node: u32) -> StyleSnapshot {
        StyleSnapshot {
            position: PositionScheme::Absolute,
            ..StyleSnapshot::default()
        }
    }

    fn set_position_scheme(&mut self, _node: u32, _scheme: Option<PositionScheme>) {}

    fn set_left_top(&mut self, _node: u32, _left_top: Option<Point>) {}

    fn set_transform(&mut self, _node: u32, _property: &str, value: Option<Translate>) {
        black_box(value);
    }

    fn scheduler(&mut self) -> &mut dyn FrameScheduler {
        &mut self.frames
    }
}

fn started(host: &mut NullHost, caps: &PlatformCapabilities, start: &RawEvent) -> Draggable<u32> {
    let options = DragOptions::new()
        .with_containment(Containment::Parent)
        .with_grid(8.0, 8.0);
    let mut drag = Draggable::new(host, caps, ElementRef::Node(ELEMENT), options).unwrap();
    drag.handle_event(host, BindTarget::Handle(ELEMENT), start);
    drag
}

fn bench_pointer_moves(c: &mut Criterion) {
    let mut group = c.benchmark_group("drag/pointer_move");
    let caps = PlatformCapabilities::modern();
    let moves: Vec<RawEvent> = (0..1_024)
        .map(|i| {
            let t = f64::from(i);
            RawEvent::pointer(
                PointerPhase::Move,
                PointerId(1),
                PointerCoords::client(Point::new(t.sin() * 900.0, t.cos() * 700.0)),
            )
        })
        .collect();
    group.throughput(Throughput::Elements(moves.len() as u64));

    group.bench_function("constrained_grid", |b| {
        let mut host = NullHost::default();
        let down = RawEvent::pointer(
            PointerPhase::Down,
            PointerId(1),
            PointerCoords::client(Point::ZERO),
        );
        let mut drag = started(&mut host, &caps, &down);
        b.iter(|| {
            for event in &moves {
                drag.handle_event(&mut host, BindTarget::Window, event);
            }
            black_box(drag.position());
        });
    });

    group.finish();
}

fn bench_touch_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("drag/touch_scan");
    let caps = PlatformCapabilities {
        input_family: InputFamily::MouseTouch,
        ..PlatformCapabilities::modern()
    };

    // The tracked touch sits at the end of the changed-touches list.
    for touches in [1_i64, 4, 10] {
        let event = RawEvent::touch(
            TouchPhase::Move,
            (0..touches).map(|i| {
                TouchPoint::new(
                    PointerId(touches - 1 - i),
                    PointerCoords::client(Point::new(10.0, 10.0)),
                )
            }),
        );
        group.bench_with_input(BenchmarkId::from_parameter(touches), &event, |b, event| {
            let mut host = NullHost::default();
            let start = RawEvent::touch(
                TouchPhase::Start,
                [TouchPoint::new(PointerId(0), PointerCoords::client(Point::ZERO))],
            );
            let mut drag = started(&mut host, &caps, &start);
            b.iter(|| drag.handle_event(&mut host, BindTarget::Window, black_box(event)));
        });
    }

    group.finish();
}

fn bench_frames(c: &mut Criterion) {
    let caps = PlatformCapabilities::modern();
    c.bench_function("drag/frame_tick", |b| {
        let mut host = NullHost::default();
        let down = RawEvent::pointer(
            PointerPhase::Down,
            PointerId(1),
            PointerCoords::client(Point::ZERO),
        );
        let mut drag = started(&mut host, &caps, &down);
        b.iter(|| {
            let id = FrameId(host.frames.0);
            drag.on_frame(&mut host, id);
        });
    });
}

criterion_group!(benches, bench_pointer_moves, bench_touch_scan, bench_frames);
criterion_main!(benches);
