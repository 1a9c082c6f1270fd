//! The shared form markup for recording and editing transactions.

use maud::{Markup, html};
use time::Date;

use crate::{
    category::categories_for,
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, BUTTON_SECONDARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE,
    },
    transaction::{Classification, Transaction, TransactionKind},
};

/// How the form submits: creating a new record or replacing an existing one.
pub(super) enum FormAction {
    /// `hx-post` to the given URL.
    Create(String),
    /// `hx-put` to the given URL.
    Update(String),
}

/// What the form is rendered for.
pub(super) struct TransactionFormOptions<'a> {
    /// The selected direction of money flow. Controls the category vocabulary
    /// and whether the source field is rendered.
    pub(super) kind: TransactionKind,
    /// Where and how the form submits.
    pub(super) action: FormAction,
    /// Prefilled values when editing an existing record.
    pub(super) values: Option<&'a Transaction>,
    /// The date the date input defaults to (the local today).
    pub(super) default_date: Date,
}

/// Render the transaction form.
///
/// Validation stays at the HTML level (`required`, `min`, `step`); the server
/// forwards whatever the remote store says about bad values.
pub(super) fn transaction_form_view(options: &TransactionFormOptions) -> Markup {
    let kind = options.kind;
    let date_value = options
        .values
        .map(|transaction| transaction.date)
        .unwrap_or(options.default_date);

    let submit_label = match options.action {
        FormAction::Create(_) => format!("Add {}", kind.label()),
        FormAction::Update(_) => format!("Update {}", kind.label()),
    };

    let body = html! {
        input type="hidden" name="kind" value=(kind);

        div
        {
            label for="amount" class=(FORM_LABEL_STYLE) { "Amount" }

            input
                id="amount"
                type="number"
                name="amount"
                min="0"
                step="0.01"
                placeholder="0.00"
                required
                value=[options.values.map(|transaction| transaction.amount)]
                class=(FORM_TEXT_INPUT_STYLE);
        }

        div
        {
            label for="description" class=(FORM_LABEL_STYLE) { "Description" }

            input
                id="description"
                type="text"
                name="description"
                placeholder="What was this for?"
                required
                value=[options.values.map(|transaction| transaction.description.as_str())]
                class=(FORM_TEXT_INPUT_STYLE);
        }

        div
        {
            label for="category" class=(FORM_LABEL_STYLE) { "Category" }

            select id="category" name="category" required class=(FORM_TEXT_INPUT_STYLE)
            {
                @for (value, label) in categories_for(kind) {
                    option
                        value=(value)
                        selected[options.values.is_some_and(|transaction| transaction.category == *value)]
                    {
                        (label)
                    }
                }
            }
        }

        div
        {
            label for="classification" class=(FORM_LABEL_STYLE) { "Type" }

            select id="classification" name="classification" required class=(FORM_TEXT_INPUT_STYLE)
            {
                @for classification in [Classification::Personal, Classification::Business] {
                    option
                        value=(classification)
                        selected[options.values.is_some_and(|transaction| transaction.classification == classification)]
                    {
                        @match classification {
                            Classification::Personal => { "Personal" }
                            Classification::Business => { "Business" }
                        }
                    }
                }
            }
        }

        div
        {
            label for="date" class=(FORM_LABEL_STYLE) { "Date" }

            input
                id="date"
                type="date"
                name="date"
                required
                value=(date_value)
                class=(FORM_TEXT_INPUT_STYLE);
        }

        @if kind == TransactionKind::Income {
            div
            {
                label for="source" class=(FORM_LABEL_STYLE) { "Source" }

                input
                    id="source"
                    type="text"
                    name="source"
                    placeholder="Who paid you?"
                    value=[options.values.and_then(|transaction| transaction.source.as_deref())]
                    class=(FORM_TEXT_INPUT_STYLE);
            }
        }

        button type="submit" class=(BUTTON_PRIMARY_STYLE) { (submit_label) }
    };

    match &options.action {
        FormAction::Create(url) => html! {
            form
                hx-post=(url)
                hx-target-error="#alert-container"
                class="w-full space-y-4 md:space-y-6"
            {
                (body)
            }
        },
        FormAction::Update(url) => html! {
            form
                hx-put=(url)
                hx-target-error="#alert-container"
                class="w-full space-y-4 md:space-y-6"
            {
                (body)
            }
        },
    }
}

/// Render the income/expense toggle shown above the entry form.
///
/// Each side is a link that re-renders the form with the matching category
/// vocabulary, title, and fields.
pub(super) fn kind_toggle_view(selected: TransactionKind) -> Markup {
    let toggle_link = |kind: TransactionKind| {
        let style = if kind == selected {
            BUTTON_PRIMARY_STYLE
        } else {
            BUTTON_SECONDARY_STYLE
        };
        let url = format!("{}?kind={}", endpoints::NEW_TRANSACTION_VIEW, kind);

        html! {
            a href=(url) class=(format!("{style} text-center")) { (kind.label()) }
        }
    };

    html! {
        div class="grid grid-cols-2 gap-2 w-full mb-4" {
            (toggle_link(TransactionKind::Expense))
            (toggle_link(TransactionKind::Income))
        }
    }
}
