//! `Table`, a concrete implementation of `TableView`: rows pairing a
//! string key (the first column, e.g. the country code) with a value
//! that implements `TableViewRow` (the remaining columns).

use std::{borrow::Cow, marker::PhantomData};

use genawaiter::rc::Gen;

use crate::{
    join::KeyVal,
    table_view::{ColumnFormatting, Highlight, TableView, TableViewRow, Unit},
};

/// `KEY_LABEL`: the column title for the key in the rows. (This needs
/// to be parameterized on the type level because `table_view_header`
/// must work for rows, and tables must be able to retrieve those
/// headers for the rows even if there are no rows.)
pub trait TableKeyLabel {
    const KEY_LABEL: &'static str;
}

pub struct Table<'s, T, KeyLabel: TableKeyLabel> {
    // key_label is pub only to allow construction with other fields.
    pub key_label: PhantomData<KeyLabel>,
    /// Width of key column in number of characters (as per Excel),
    /// None == automatic.
    pub key_column_width: Option<f64>,
    /// Table name, also the worksheet name in Excel output
    pub name: Cow<'s, str>,
    pub rows: Vec<KeyVal<Cow<'s, str>, T>>,
}

impl<'t, T: TableViewRow<()>, KeyLabel: TableKeyLabel> TableView for Table<'t, T, KeyLabel> {
    fn table_name(&self) -> Cow<str> {
        self.name.as_ref().into()
    }

    fn table_view_header(&self) -> Box<dyn AsRef<[(Cow<'static, str>, Unit, ColumnFormatting)]>> {
        let mut header: Vec<(Cow<'static, str>, Unit, ColumnFormatting)> = vec![(
            KeyLabel::KEY_LABEL.into(),
            Unit::None,
            ColumnFormatting::String {
                width_chars: self.key_column_width,
            },
        )];
        let row_header = T::table_view_header(());
        for label in (*row_header).as_ref() {
            header.push(label.clone());
        }
        Box::new(header)
    }

    fn table_view_body<'s>(
        &'s self,
    ) -> Box<dyn Iterator<Item = Cow<'s, [(Cow<'s, str>, Highlight)]>> + 's> {
        Box::new(
            Gen::new(|co| async move {
                for KeyVal { key, val } in &self.rows {
                    // Can't re-use vals across yield calls for
                    // lifetime reasons, so allocate a new one for
                    // every iteration.
                    let mut vals = Vec::new();
                    vals.push((key.clone(), Highlight::Neutral));
                    val.table_view_row(&mut vals);
                    co.yield_(vals.into()).await;
                }
            })
            .into_iter(),
        )
    }
}
