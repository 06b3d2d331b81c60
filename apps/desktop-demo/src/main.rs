mod contacts;
mod viewport;

use std::rc::Rc;

use stickyrows::prelude::*;

use contacts::{sample_contacts, Contact, ContactsAdapter};
use viewport::Viewport;

const WIDTH: f32 = 360.0;
const HEIGHT: f32 = 240.0;
const SCROLL_STEP: f32 = 30.0;
const FRAMES: usize = 16;

fn main() {
    #[cfg(feature = "logging")]
    let _ = env_logger::try_init();

    if let Err(err) = run() {
        eprintln!("desktop-app: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), RowError> {
    let contacts = Rc::new(ContactsAdapter::new(sample_contacts()));

    let mut shim = GroupedAdapterShim::new(Rc::clone(&contacts));
    shim.set_divider(Some(Divider::new(ColorDrawable::new(Color::LIGHT_GRAY), 1.0)));
    shim.on_header_click(|_header, position, header_id| {
        let initial = u32::try_from(header_id)
            .ok()
            .and_then(char::from_u32)
            .unwrap_or('#');
        println!("  > tapped header '{initial}' on row {position}");
    });

    let mut viewport = Viewport::new(shim, WIDTH, HEIGHT);
    viewport.fill()?;
    print_frame(0, &viewport);

    for frame in 1..=FRAMES {
        match frame {
            5 => {
                viewport.click_first_header();
            }
            8 => {
                println!("  + adding Dorothy");
                contacts.add(Contact::new("Dorothy").starred());
            }
            11 => {
                println!("  ~ starring row 12");
                contacts.toggle_star(12);
            }
            _ => {}
        }
        if viewport.take_data_dirty() {
            log::info!("data set changed before frame {frame}");
        }
        viewport.scroll_by(SCROLL_STEP)?;
        print_frame(frame, &viewport);
    }

    println!("{:#?}", viewport.adapter().stats());
    Ok(())
}

fn print_frame<L: ListAdapter + HeaderSource>(frame: usize, viewport: &Viewport<L>) {
    let mut canvas = FillCounter::default();
    viewport.draw(&mut canvas);

    println!("frame {frame:>2} ({} fills)", canvas.fills);
    if let Some(pinned) = viewport.pinned() {
        println!(
            "  pinned [{}] for row {} at {:.0}",
            text_of(&pinned.view),
            pinned.position,
            pinned.offset
        );
    }
    for visible in viewport.rows() {
        let header = visible.row.header().map(text_of).unwrap_or_default();
        let item = visible.row.item().map(text_of).unwrap_or_default();
        let marker = match visible.row.variant() {
            RowVariant::Checkable => '*',
            RowVariant::Plain => ' ',
        };
        println!("  {:>6.0} {header:>2} |{marker} {item}", visible.top);
    }
}

fn text_of(view: &ViewHandle) -> String {
    view.with_view(|leaf: &mut LeafView| leaf.text().to_owned())
        .unwrap_or_default()
}

#[derive(Default)]
struct FillCounter {
    fills: usize,
}

impl Canvas for FillCounter {
    fn fill_rect(&mut self, _rect: Rect, _color: Color) {
        self.fills += 1;
    }
}
