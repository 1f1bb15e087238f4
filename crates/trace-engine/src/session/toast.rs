use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Success,
    Info,
    Error,
}

/// A short-lived notification shown above the canvas.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub text: String,
    /// Seconds left before it expires.
    #[serde(skip)]
    pub remaining: f32,
}

/// Ordered toasts with per-toast expiry.
///
/// Ids keep counting across `clear()`, so a dismiss request for a toast from
/// an earlier letter can never hit a newer one.
#[derive(Debug, Clone)]
pub struct ToastQueue {
    toasts: Vec<Toast>,
    next_id: u64,
    lifetime: f32,
}

impl ToastQueue {
    pub fn new(lifetime: f32) -> Self {
        Self {
            toasts: Vec::new(),
            next_id: 0,
            lifetime,
        }
    }

    /// Append a toast; returns its id.
    pub fn push(&mut self, kind: ToastKind, text: impl Into<String>) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.toasts.push(Toast {
            id,
            kind,
            text: text.into(),
            remaining: self.lifetime,
        });
        id
    }

    /// Dismiss a toast. Returns false if it was already gone.
    pub fn remove(&mut self, id: u64) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|t| t.id != id);
        self.toasts.len() != before
    }

    /// Age every toast by `dt` seconds and drop the expired ones.
    pub fn tick(&mut self, dt: f32) {
        for toast in &mut self.toasts {
            toast.remaining -= dt;
        }
        self.toasts.retain(|t| t.remaining > 0.0);
    }

    pub fn clear(&mut self) {
        self.toasts.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter()
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    /// `[{"id":0,"kind":"success","text":"..."}, ...]`
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.toasts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expires_after_lifetime() {
        let mut q = ToastQueue::new(3.0);
        q.push(ToastKind::Info, "first");
        q.tick(2.0);
        q.push(ToastKind::Error, "second");
        q.tick(1.0);
        assert_eq!(q.len(), 1);
        assert_eq!(q.iter().next().map(|t| t.text.as_str()), Some("second"));
        q.tick(2.5);
        assert!(q.is_empty());
    }

    #[test]
    fn ids_survive_clear() {
        let mut q = ToastQueue::new(3.0);
        let a = q.push(ToastKind::Info, "a");
        q.clear();
        let b = q.push(ToastKind::Info, "b");
        assert!(b > a);
        assert!(!q.remove(a));
        assert!(q.remove(b));
        assert!(q.is_empty());
    }

    #[test]
    fn json_shape() {
        let mut q = ToastQueue::new(3.0);
        q.push(ToastKind::Success, "done");
        assert_eq!(
            q.to_json().unwrap(),
            r#"[{"id":0,"kind":"success","text":"done"}]"#
        );
    }
}
